//! Embedded dashboard page.
//!
//! A single static HTML page driving the JSON API with fetch():
//! upload, anchor, verify, tamper demo, and EDA for verified data.

use axum::response::Html;

pub async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Dataset Integrity Anchor</title>
<style>
  body { font-family: sans-serif; max-width: 960px; margin: 2rem auto; color: #222; }
  h1 { text-align: center; color: #4CAF50; }
  .card { border: 1px solid #ddd; border-radius: 6px; padding: 1rem; margin: 1rem 0; }
  button { background: #4CAF50; color: white; border: none; border-radius: 4px;
           padding: 0.5rem 1rem; margin-right: 0.5rem; cursor: pointer; }
  button:disabled { background: #aaa; }
  pre { background: #f6f6f6; padding: 0.75rem; border-radius: 4px; overflow-x: auto; }
  .ok { color: #2e7d32; } .err { color: #c62828; }
  footer { text-align: center; color: grey; margin-top: 2rem; }
</style>
</head>
<body>
<h1>Dataset Integrity Anchor</h1>
<p>Upload a CSV dataset, anchor its fingerprint on Sepolia, and verify integrity.</p>
<ol>
  <li><strong>Upload CSV</strong> — preview and digest are computed</li>
  <li><strong>Anchor</strong> — store the digest on the test network</li>
  <li><strong>Verify</strong> — compare the dataset against the anchored value</li>
  <li><strong>Tamper demo</strong> — see a single change break verification</li>
  <li><strong>EDA</strong> — summaries, only for verified data</li>
</ol>

<div class="card">
  <input type="file" id="file" accept=".csv">
  <button onclick="upload()">Upload</button>
  <div id="upload-out"></div>
</div>

<div class="card">
  <button onclick="call('POST', '/api/anchor', 'action-out')">Anchor on blockchain</button>
  <button onclick="call('GET', '/api/verify', 'action-out')">Verify integrity</button>
  <button onclick="call('POST', '/api/tamper-demo', 'action-out')">Tamper demo</button>
  <button onclick="call('GET', '/api/eda', 'action-out')">EDA</button>
  <div id="action-out"></div>
</div>

<footer>Anchored with SHA-256 on the Sepolia test network</footer>

<script>
async function upload() {
  const input = document.getElementById('file');
  if (!input.files.length) { return render('upload-out', false, {message: 'Choose a CSV file first'}); }
  const body = await input.files[0].arrayBuffer();
  const res = await fetch('/api/dataset', {method: 'POST', body,
    headers: {'Content-Type': 'text/csv'}});
  render('upload-out', res.ok, await res.json());
}

async function call(method, path, target) {
  const res = await fetch(path, {method});
  render(target, res.ok, await res.json());
}

function render(id, ok, data) {
  const el = document.getElementById(id);
  el.innerHTML = '<p class="' + (ok ? 'ok' : 'err') + '">' +
    (ok ? 'OK' : (data.message || 'request failed')) + '</p>' +
    '<pre>' + JSON.stringify(data, null, 2) + '</pre>';
}
</script>
</body>
</html>
"#;
