use crate::core::loader::load_names;
use crate::core::placer::Placer;
use crate::core::provisioner::provision_document;
use crate::core::resolver::FileResolver;
use crate::core::validator::validate_config;
use crate::core::{ConfigProvider, Host, NameEntry, PlacementResult, Report, Storage};
use crate::domain::model::ScaleAxis;
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub results: Vec<PlacementResult>,
    pub report: Report,
}

pub struct CollageEngine<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> CollageEngine<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// 完整流程：驗證、讀清單、準備文件、置入與變形、產生報告。
    /// 驗證或清單失敗時直接回傳錯誤，宿主文件不會被更動。
    pub async fn run<H: Host>(&self, host: &mut H) -> Result<RunOutcome> {
        tracing::info!("Starting linked placement...");
        let (axis, names) = self.prepare().await?;

        let document = provision_document(host, &self.config.document_settings())?;

        tracing::info!("Placing {} files...", names.len());
        let placer = Placer::new(
            self.resolver(),
            axis,
            self.config.scale_percent(),
            self.config.align_to_center(),
        );
        let results = placer.place_all(document, &names).await?;

        let report = Report::from_results(&results);
        tracing::info!(
            "Placed {} of {} files ({} not found)",
            report.found(),
            report.total,
            report.not_found.len()
        );

        Ok(RunOutcome { results, report })
    }

    /// 只解析檔案、不建立也不修改文件
    pub async fn dry_run(&self) -> Result<Report> {
        let (_, names) = self.prepare().await?;
        let resolver = self.resolver();

        let mut not_found = Vec::new();
        for name in &names {
            match resolver.resolve(name).await? {
                Some(resolved) => {
                    tracing::info!("✔ {} -> {}", name, resolved.path.display());
                }
                None => {
                    tracing::info!("✘ {} (not found)", name);
                    not_found.push(name.to_string());
                }
            }
        }

        Ok(Report {
            total: names.len(),
            not_found,
        })
    }

    async fn prepare(&self) -> Result<(ScaleAxis, Vec<NameEntry>)> {
        tracing::info!("Validating configuration...");
        let axis = validate_config(&self.storage, &self.config).await?;

        tracing::info!("Reading list {}...", self.config.list_file().display());
        let names = load_names(&self.storage, self.config.list_file()).await?;
        tracing::info!("Loaded {} names", names.len());

        Ok((axis, names))
    }

    fn resolver(&self) -> FileResolver<'_, S> {
        FileResolver::new(
            &self.storage,
            self.config.source_dir(),
            self.config.extensions(),
        )
    }
}
