//! Built-in pages
//!
//! The landing page is compiled in rather than read from disk so the server
//! always has something to serve, even with an empty asset directory.

const HOME_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Socket Security Demo</title>
    <link rel="stylesheet" href="/styles.css">
</head>
<body>
    <div class="container">
        <h1>&#128274; Socket Security Demo</h1>
        <p class="subtitle">A deliberately small web service for demonstrating
        dependency reachability analysis on a Rust application.</p>

        <div class="card">
            <h2>Scanned dependencies</h2>
            <p>The crates below are declared in this application's manifest and
            exercised at runtime, so a reachability scan sees them all:</p>
            <ul>
                <li><code>hyper</code> &mdash; HTTP protocol handling</li>
                <li><code>tokio</code> &mdash; async runtime</li>
                <li><code>serde</code> / <code>serde_json</code> &mdash; payload serialization</li>
                <li><code>chrono</code> &mdash; timestamps and session expiry</li>
                <li><code>rand</code> &mdash; session identifiers</li>
            </ul>
        </div>

        <div class="card">
            <h2>Endpoints</h2>
            <ul>
                <li><code>GET /</code> &mdash; this page</li>
                <li><code>GET /health</code> &mdash; liveness probe with dependency count</li>
                <li><code>GET /api/info</code> &mdash; application and runtime metadata</li>
            </ul>
        </div>

        <footer>
            <p>Modeled on <a href="https://github.com/OWASP/NodeGoat">OWASP NodeGoat</a>.
            Scan it with <a href="https://docs.socket.dev">Socket</a>.</p>
        </footer>
    </div>
</body>
</html>
"#;

/// The landing page markup. Pure and constant, so handlers and tests get
/// byte-identical output.
#[must_use]
pub const fn render_home_page() -> &'static str {
    HOME_PAGE
}
