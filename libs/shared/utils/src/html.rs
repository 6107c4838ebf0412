//! Small HTML helpers shared by the page renderers.

pub use shared_models::html::escape;

/// Escaped value, or `fallback` when missing or blank.
pub fn or_default(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => escape(v),
        _ => escape(fallback),
    }
}

pub fn or_na(value: Option<&str>) -> String {
    or_default(value, "N/A")
}

/// First letters of two name fields.
pub fn initials(first: Option<&str>, last: Option<&str>, fallback: (&str, &str)) -> String {
    let letter = |name: Option<&str>, fallback: &str| {
        name.and_then(|s| s.trim().chars().next())
            .map(String::from)
            .unwrap_or_else(|| fallback.to_string())
    };
    escape(&format!("{}{}", letter(first, fallback.0), letter(last, fallback.1)))
}

pub fn stat_card(id: &str, label: &str, value: &str) -> String {
    format!(
        r#"<div class="col"><div class="card stat-card"><div class="card-body"><small class="text-muted">{}</small><h3 id="{}">{}</h3></div></div></div>"#,
        escape(label),
        escape(id),
        escape(value)
    )
}

pub fn alert(kind: &str, message: &str) -> String {
    format!(
        r#"<div class="alert alert-{} py-2" role="alert"><small>{}</small></div>"#,
        escape(kind),
        escape(message)
    )
}

/// Nav entries: (path, label).
const NAV: [(&str, &str); 6] = [
    ("/dashboard", "Dashboard"),
    ("/patients", "Pacientes"),
    ("/appointments", "Citas"),
    ("/calendar", "Calendario"),
    ("/staff", "Personal"),
    ("/reports", "Reportes"),
];

/// Full page with navigation bar.
pub fn page(title: &str, active: &str, username: Option<&str>, body: &str) -> String {
    let nav: String = NAV
        .iter()
        .map(|(path, label)| {
            let class = if *path == active { "nav-link active" } else { "nav-link" };
            format!(r#"<li class="nav-item"><a class="{}" href="{}">{}</a></li>"#, class, path, label)
        })
        .collect();

    let user = username
        .map(|name| {
            format!(
                r#"<a class="navbar-text me-3" id="usernameDisplay" href="/session">{}</a><form method="post" action="/logout" class="d-inline"><button class="btn btn-sm btn-outline-light">Salir</button></form>"#,
                escape(name)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{title} - PsicoClinic</title>
  <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css" rel="stylesheet" />
  <link href="https://cdn.jsdelivr.net/npm/bootstrap-icons@1.11.1/font/bootstrap-icons.css" rel="stylesheet" />
  <style>
    .avatar {{ width: 36px; height: 36px; border-radius: 50%; background: #ff9999; color: #fff; display: inline-flex; align-items: center; justify-content: center; font-weight: 600; }}
    .calendar-grid {{ display: grid; grid-template-columns: repeat(7, 1fr); gap: 4px; }}
    .calendar-day {{ padding: 8px; text-align: center; border-radius: 6px; text-decoration: none; color: inherit; }}
    .calendar-day.outside {{ opacity: 0.3; cursor: default; }}
    .calendar-day.today {{ border: 2px solid #ff6b6b; }}
    .calendar-day.selected-day {{ background: #ff6b6b; color: #fff; }}
    .appointment-slot {{ display: flex; gap: 12px; padding: 8px 0; border-bottom: 1px solid #eee; }}
    .time-slot {{ font-weight: 600; min-width: 60px; }}
  </style>
</head>
<body class="protected-page">
  <nav class="navbar navbar-expand navbar-dark bg-dark mb-4 px-3">
    <a class="navbar-brand" href="/dashboard">PsicoClinic</a>
    <ul class="navbar-nav me-auto">{nav}</ul>
    {user}
  </nav>
  <main class="container">
    <h4 class="mb-3">{title_escaped}</h4>
    {body}
  </main>
</body>
</html>"#,
        title = escape(title),
        title_escaped = escape(title),
        nav = nav,
        user = user,
        body = body,
    )
}

/// Percentage bar used by the report distributions.
pub fn progress_bar(color: &str, percentage: f64) -> String {
    format!(
        r#"<div class="progress"><div class="progress-bar bg-{}" role="progressbar" style="width: {:.1}%" aria-valuenow="{:.1}" aria-valuemin="0" aria-valuemax="100"></div></div>"#,
        escape(color),
        percentage,
        percentage
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("<b>\"x\" & 'y'</b>"), "&lt;b&gt;&quot;x&quot; &amp; &#x27;y&#x27;&lt;/b&gt;");
    }

    #[test]
    fn fallbacks_for_blank_values() {
        assert_eq!(or_na(None), "N/A");
        assert_eq!(or_na(Some("  ")), "N/A");
        assert_eq!(or_na(Some("600123123")), "600123123");
        assert_eq!(or_default(None, "Sin hora"), "Sin hora");
    }

    #[test]
    fn initials_use_fallback_letters() {
        assert_eq!(initials(Some("Ana"), Some("Ruiz"), ("P", "X")), "AR");
        assert_eq!(initials(None, Some("Ruiz"), ("P", "X")), "PR");
        assert_eq!(initials(Some("Ángel"), None, ("E", "S")), "ÁS");
        assert_eq!(initials(Some("Ana"), None, ("", "")), "A");
    }

    #[test]
    fn page_marks_active_nav() {
        let html = page("Pacientes", "/patients", Some("admin"), "<p>x</p>");
        assert!(html.contains(r#"<a class="nav-link active" href="/patients">"#));
        assert!(html.contains("admin"));
        assert!(html.contains("<p>x</p>"));
    }
}
