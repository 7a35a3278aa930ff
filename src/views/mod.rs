//! Minimal HTML forms. Everything else the app returns is JSON or a redirect.

pub const LOGIN_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>TinyApp - Login</title></head>
<body>
  <h1>Login</h1>
  <form method="POST" action="/login">
    <input type="email" name="email" placeholder="Email" required>
    <input type="password" name="password" placeholder="Password" required>
    <button type="submit">Login</button>
  </form>
  <p><a href="/register">Register</a></p>
</body>
</html>
"#;

pub const REGISTER_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>TinyApp - Register</title></head>
<body>
  <h1>Register</h1>
  <form method="POST" action="/register">
    <input type="email" name="email" placeholder="Email" required>
    <input type="password" name="password" placeholder="Password" required>
    <button type="submit">Register</button>
  </form>
  <p><a href="/login">Login</a></p>
</body>
</html>
"#;

pub const NEW_URL_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>TinyApp - Create TinyURL</title></head>
<body>
  <h1>Create TinyURL</h1>
  <form method="POST" action="/urls">
    <input type="url" name="longURL" placeholder="http://" required>
    <button type="submit">Submit</button>
  </form>
  <form method="POST" action="/logout"><button type="submit">Logout</button></form>
</body>
</html>
"#;
