//! Server-rendered pages. Every user-supplied value goes through [`escape`].

use std::fmt::Write;

use crate::api::rest::dto::{ClienteForm, Status};
use crate::contract::model::Cliente;

const STYLE: &str = r#"
  body { font-family: system-ui, sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; }
  form.add { display: grid; gap: .5rem; margin-bottom: 1.5rem; }
  .ok { background: #e7f6e7; border: 1px solid #9c9; padding: .5rem; }
  .errors { background: #fdecea; border: 1px solid #e99; padding: .5rem 1.5rem; }
  table { width: 100%; border-collapse: collapse; }
  th, td { text-align: left; padding: .35rem; border-bottom: 1px solid #ddd; }
"#;

/// HTML-escape text for element content and quoted attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <title>{title}</title>
  <style>{STYLE}</style>
</head>
<body>
{body}
</body>
</html>"#,
        title = escape(title),
    )
}

/// The list page: acknowledgment, errors, the add form (repopulated
/// from `form`) and the records, newest first.
pub fn clientes_page(
    clientes: &[Cliente],
    form: &ClienteForm,
    errors: &[String],
    status: Option<Status>,
) -> String {
    let mut body = String::from("<h1>Clientes</h1>\n");

    if let Some(status) = status {
        let _ = writeln!(
            body,
            r#"<p class="ok" data-status="{}">{}</p>"#,
            status.as_str(),
            escape(status.message())
        );
    }

    if !errors.is_empty() {
        body.push_str("<ul class=\"errors\">\n");
        for e in errors {
            let _ = writeln!(body, "  <li>{}</li>", escape(e));
        }
        body.push_str("</ul>\n");
    }

    let _ = write!(
        body,
        r#"<form class="add" method="post" action="/clientes">
  <label>Name <input name="nome" maxlength="100" required value="{nome}"/></label>
  <label>Email <input name="email" type="email" maxlength="120" value="{email}"/></label>
  <label>Phone <input name="telefone" maxlength="50" value="{telefone}"/></label>
  <button type="submit">Add</button>
</form>
"#,
        nome = escape(&form.nome),
        email = escape(&form.email),
        telefone = escape(&form.telefone),
    );

    if clientes.is_empty() {
        body.push_str("<p class=\"empty\">No clientes yet.</p>\n");
    } else {
        body.push_str(
            "<table>\n<thead><tr><th>#</th><th>Name</th><th>Email</th><th>Phone</th><th></th></tr></thead>\n<tbody>\n",
        );
        for c in clientes {
            let _ = writeln!(
                body,
                r#"<tr><td>{id}</td><td>{nome}</td><td>{email}</td><td>{telefone}</td><td><form method="post" action="/clientes/{id}/excluir"><button type="submit">Delete</button></form></td></tr>"#,
                id = c.id,
                nome = escape(&c.nome),
                email = escape(c.email.as_deref().unwrap_or_default()),
                telefone = escape(c.telefone.as_deref().unwrap_or_default()),
            );
        }
        body.push_str("</tbody>\n</table>\n");
    }

    layout("Clientes", &body)
}

/// Standalone page for 404/500 responses.
pub fn error_page(title: &str, detail: &str) -> String {
    let body = format!(
        "<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"/clientes\">Back to list</a></p>\n",
        escape(title),
        escape(detail)
    );
    layout(title, &body)
}
