/// 最後顯示給使用者的摘要訊息
pub fn build_report(total: usize, not_found: &[String]) -> String {
    let found = total.saturating_sub(not_found.len());
    let mut message = format!(
        "Importação concluída.\nArquivos encontrados: {}\nArquivos não encontrados: {}",
        found,
        not_found.len()
    );

    if !not_found.is_empty() {
        message.push_str("\n\nNão encontrados:\n");
        message.push_str(&not_found.join(", "));
    }

    message
}
