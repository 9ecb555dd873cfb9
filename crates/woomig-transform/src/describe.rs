//! HTML assembly for product descriptions.

/// Formats a raw short description plus display attributes into the
/// `descriptionHtml` sent to the remote catalog.
///
/// The export encodes line breaks as the literal two-character sequence
/// `\n`, so paragraphs split on literal `\n\n` and single `\n` becomes
/// `<br />`. Each non-empty paragraph is wrapped in `<p>…</p>`. When any
/// display attributes exist, an HTML table of them is appended.
#[must_use]
pub fn format_description(text: &str, product_attributes: &[(String, String)]) -> String {
    let mut description = String::new();

    if !text.is_empty() {
        for paragraph in text.split("\\n\\n") {
            if paragraph.trim().is_empty() {
                continue;
            }
            let with_breaks = paragraph.replace("\\n", "<br />");
            description.push_str("<p>");
            description.push_str(&with_breaks);
            description.push_str("</p>");
        }
    }

    if !product_attributes.is_empty() {
        description.push_str(
            "<br/><br/><b>Product Attributes:</b>\
             <table style='border-collapse: collapse; width: 100%;'>",
        );
        for (name, value) in product_attributes {
            description.push_str(&format!(
                "<tr><td style='border: 1px solid #ddd; padding: 8px;'><b>{name}</b></td>\
                 <td style='border: 1px solid #ddd; padding: 8px;'>{value}</td></tr>"
            ));
        }
        description.push_str("</table>");
    }

    description
}
