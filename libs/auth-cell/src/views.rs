use serde_json::Value;

use shared_models::session::SessionSnapshot;
use shared_utils::html::{alert, escape, or_na};

/// Stand-alone login page; it has no navigation bar.
pub fn login_page(notice: Option<(&str, &str)>, username: &str) -> String {
    let notice = notice
        .map(|(kind, message)| alert(kind, message))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Iniciar sesión - PsicoClinic</title>
  <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css" rel="stylesheet" />
</head>
<body class="bg-light">
  <main class="container" style="max-width: 420px; margin-top: 10vh;">
    <div class="card shadow-sm">
      <div class="card-body p-4">
        <h4 class="mb-3 text-center">PsicoClinic</h4>
        {notice}
        <form method="post" action="/login" id="loginForm">
          <div class="mb-3">
            <label class="form-label" for="username">Usuario</label>
            <input class="form-control" id="username" name="username" value="{username}" required autofocus />
          </div>
          <div class="mb-3">
            <label class="form-label" for="password">Contraseña</label>
            <input class="form-control" id="password" name="password" type="password" required />
          </div>
          <button class="btn btn-danger w-100" type="submit">Iniciar sesión</button>
        </form>
      </div>
    </div>
  </main>
</body>
</html>"#,
        notice = notice,
        username = escape(username),
    )
}

/// Session details with the decoded token payload.
pub fn session_details(snapshot: &SessionSnapshot, payload: Option<&Value>) -> String {
    let payload = payload
        .and_then(|p| serde_json::to_string_pretty(p).ok())
        .unwrap_or_else(|| "no decodificable".to_string());

    format!(
        r#"<div class="card"><div class="card-body">
  <dl class="row mb-0">
    <dt class="col-sm-3">Usuario</dt><dd class="col-sm-9">{username}</dd>
    <dt class="col-sm-3">Rol</dt><dd class="col-sm-9">{role}</dd>
  </dl>
  <pre id="jwtPayloadDisplay" class="bg-light p-3 mt-3 text-wrap text-break">JWT Token:
{token}

Payload:
{payload}</pre>
</div></div>"#,
        username = or_na(snapshot.username.as_deref()),
        role = or_na(snapshot.role.as_deref()),
        token = escape(snapshot.token.as_deref().unwrap_or_default()),
        payload = escape(&payload),
    )
}
