use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Meaning of one character of a generated name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterMeaning {
    pub character: String,
    #[serde(default)]
    pub pinyin: String,
    #[serde(default)]
    pub meaning: String,
}

/// A generated Chinese name as returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameData {
    pub chinese_name: String,
    #[serde(default)]
    pub pinyin: String,
    #[serde(default)]
    pub meaning: Option<String>,
    #[serde(default)]
    pub characters: Vec<CharacterMeaning>,
    #[serde(default)]
    pub cultural_context: Option<String>,
}

impl NameData {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.chinese_name.trim().is_empty() {
            return Err(ValidationError::empty_field("nameData.chineseName"));
        }
        Ok(())
    }

    /// File name for the exported certificate, ASCII only so it survives
    /// the `Content-Disposition` header.
    pub fn export_file_name(&self) -> String {
        let stem: String = self
            .pinyin
            .chars()
            .filter_map(|c| {
                if c.is_ascii_alphanumeric() {
                    Some(c.to_ascii_lowercase())
                } else if c == ' ' || c == '-' {
                    Some('-')
                } else {
                    None
                }
            })
            .collect();
        let stem = stem.trim_matches('-');
        if stem.is_empty() {
            "chinese-name-certificate.pdf".to_string()
        } else {
            format!("{}-certificate.pdf", stem)
        }
    }
}

/// The person the name was generated for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    #[serde(default)]
    pub english_name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub birth_year: Option<String>,
}

/// Lays out the printable certificate.
pub fn certificate_html(name: &NameData, user: &UserData) -> String {
    let mut characters = String::new();
    for c in &name.characters {
        characters.push_str(&format!(
            "<tr><td class=\"char\">{}</td><td>{}</td><td>{}</td></tr>\n",
            html_escape(&c.character),
            html_escape(&c.pinyin),
            html_escape(&c.meaning)
        ));
    }

    let recipient = user
        .english_name
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(|n| format!("<p class=\"recipient\">Prepared for {}</p>", html_escape(n)))
        .unwrap_or_default();

    let meaning = name
        .meaning
        .as_deref()
        .map(|m| format!("<p class=\"meaning\">{}</p>", html_escape(m)))
        .unwrap_or_default();

    let context = name
        .cultural_context
        .as_deref()
        .map(|c| format!("<section class=\"context\"><h2>Cultural context</h2><p>{}</p></section>", html_escape(c)))
        .unwrap_or_default();

    let table = if characters.is_empty() {
        String::new()
    } else {
        format!(
            "<table><thead><tr><th>Character</th><th>Pinyin</th><th>Meaning</th></tr></thead><tbody>\n{}</tbody></table>",
            characters
        )
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="zh">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>{css}</style>
</head>
<body>
<main>
<h1 class="name">{name}</h1>
<p class="pinyin">{pinyin}</p>
{recipient}
{meaning}
{table}
{context}
</main>
</body>
</html>
"#,
        title = html_escape(&name.chinese_name),
        css = CERTIFICATE_CSS,
        name = html_escape(&name.chinese_name),
        pinyin = html_escape(&name.pinyin),
        recipient = recipient,
        meaning = meaning,
        table = table,
        context = context,
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const CERTIFICATE_CSS: &str = r#"
body { font-family: "Noto Serif SC", "Songti SC", serif; color: #1f2937; }
main { text-align: center; padding: 48px; border: 6px double #b91c1c; }
.name { font-size: 96px; margin: 0; color: #b91c1c; }
.pinyin { font-size: 28px; letter-spacing: 4px; color: #6b7280; }
.recipient { font-style: italic; }
table { margin: 24px auto; border-collapse: collapse; }
td, th { padding: 8px 16px; border-bottom: 1px solid #e5e7eb; }
.char { font-size: 32px; }
"#;
