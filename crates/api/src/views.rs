//! Server-rendered HTML pages.
//!
//! Page bodies are Leptos components rendered to a string; record text comes
//! from the search model and user edits, and Leptos escapes it on render. The
//! surrounding shell, styles and scripts are static HTML.

use hackradar_db::models::hackathon::Hackathon;
use leptos::{component, view, IntoView};

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// Home page: all active hackathons, latest end date first.
pub fn index_page(hackathons: Vec<Hackathon>, error: Option<&'static str>) -> String {
    let body = leptos::ssr::render_to_string(move || {
        view! { <IndexPage hackathons=hackathons error=error /> }
    });
    page_shell("Hackathons", &body)
}

/// Detail page for one hackathon, with edit and delete actions.
pub fn detail_page(hackathon: Hackathon) -> String {
    let body = leptos::ssr::render_to_string(move || {
        view! { <DetailPage hackathon=hackathon /> }
    });
    page_shell("Hackathon", &body)
}

/// Edit form posting to `/update/{id}`.
pub fn edit_page(hackathon: Hackathon) -> String {
    let body = leptos::ssr::render_to_string(move || {
        view! { <EditPage hackathon=hackathon /> }
    });
    page_shell("Edit hackathon", &body)
}

// ---------------------------------------------------------------------------
// Leptos components
// ---------------------------------------------------------------------------

#[component]
fn Badge(text: String) -> impl IntoView {
    view! { <span class="badge">{text}</span> }
}

#[component]
fn Field(label: &'static str, value: Option<String>) -> impl IntoView {
    view! {
        <dt>{label}</dt>
        <dd>{value}</dd>
    }
}

#[component]
fn TextField(name: &'static str, label: &'static str, value: String) -> impl IntoView {
    view! {
        <label>
            {label}
            <input type="text" name=name value=value />
        </label>
    }
}

#[component]
fn HackathonCard(hackathon: Hackathon) -> impl IntoView {
    let Hackathon {
        id,
        title,
        end_date,
        website_url,
        platform,
        status,
        description,
        ..
    } = hackathon;

    view! {
        <article class="card">
            <h2><a href=format!("/hackathon/{id}")>{title}</a></h2>
            <p class="meta">
                <Badge text=platform />" "<Badge text=status />" Ends "{end_date}
            </p>
            <p>{description}</p>
            <p class="links">
                <a href=website_url target="_blank" rel="noopener">"Website"</a>
                " · "
                <a href=format!("/search/{id}") target="_blank" rel="noopener">"Search"</a>
            </p>
        </article>
    }
}

#[component]
fn IndexPage(hackathons: Vec<Hackathon>, error: Option<&'static str>) -> impl IntoView {
    view! {
        <section class="toolbar">
            <h1>"Open hackathons"</h1>
            <button id="scrape" type="button">"Scrape now"</button>
            <span id="scrape-status"></span>
        </section>

        {error.map(|message| view! { <div class="alert">{message}</div> })}

        <section class="grid">
            {if hackathons.is_empty() {
                view! {
                    <p class="empty">"No open hackathons yet. The next scrape will look for some."</p>
                }.into_view()
            } else {
                hackathons
                    .into_iter()
                    .map(|hackathon| view! { <HackathonCard hackathon=hackathon /> })
                    .collect::<Vec<_>>()
                    .into_view()
            }}
        </section>
    }
}

#[component]
fn DetailPage(hackathon: Hackathon) -> impl IntoView {
    let Hackathon {
        id,
        title,
        end_date,
        website_url,
        platform,
        status,
        description,
        organizer,
        registration_deadline,
        event_date,
        prize_pool,
        eligibility,
        tags,
        source,
        scraped_at,
        updated_at,
        ..
    } = hackathon;

    let website_href = website_url.clone();
    let scraped = format!("{} ({source})", scraped_at.to_rfc3339());
    let updated = updated_at
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "never".to_string());

    view! {
        <article class="detail">
            <h1>{title}</h1>
            <p class="meta">
                <Badge text=platform />" "<Badge text=status />" "
                {tags.into_iter().map(|tag| view! { <Badge text=tag /> }).collect::<Vec<_>>()}
            </p>
            <dl>
                <Field label="Ends" value=Some(end_date) />
                <Field label="Organizer" value=organizer />
                <Field label="Registration deadline" value=registration_deadline />
                <Field label="Event date" value=event_date />
                <Field label="Prize pool" value=prize_pool />
                <Field label="Eligibility" value=eligibility />
                <dt>"Website"</dt>
                <dd><a href=website_href target="_blank" rel="noopener">{website_url}</a></dd>
                <Field label="Scraped" value=Some(scraped) />
                <Field label="Last edited" value=Some(updated) />
            </dl>
            <p>{description}</p>
            <p class="actions">
                <a href=format!("/edit/{id}")>"Edit"</a>
                <a href=format!("/search/{id}") target="_blank" rel="noopener">"Search the web"</a>
                <button type="button" class="delete" data-id=id.to_string()>"Delete"</button>
            </p>
        </article>
    }
}

#[component]
fn EditPage(hackathon: Hackathon) -> impl IntoView {
    let Hackathon {
        id,
        title,
        end_date,
        website_url,
        platform,
        status,
        description,
        organizer,
        registration_deadline,
        event_date,
        prize_pool,
        eligibility,
        tags,
        ..
    } = hackathon;
    let heading = format!("Edit {title}");

    view! {
        <h1>{heading}</h1>
        <form class="edit" method="post" action=format!("/update/{id}")>
            <TextField name="title" label="Title" value=title />
            <TextField name="end_date" label="End date (YYYY-MM-DD or TBD)" value=end_date />
            <TextField name="organizer" label="Organizer" value=organizer.unwrap_or_default() />
            <TextField
                name="registration_deadline"
                label="Registration deadline"
                value=registration_deadline.unwrap_or_default()
            />
            <TextField name="event_date" label="Event date" value=event_date.unwrap_or_default() />
            <TextField name="prize_pool" label="Prize pool" value=prize_pool.unwrap_or_default() />
            <TextField name="website_url" label="Website" value=website_url />
            <TextField name="platform" label="Platform" value=platform />
            <TextField name="status" label="Status" value=status />
            <TextField name="eligibility" label="Eligibility" value=eligibility.unwrap_or_default() />
            <TextField name="tags" label="Tags (comma separated)" value=tags.join(", ") />
            <label>
                "Description"
                <textarea name="description" rows="5">{description.unwrap_or_default()}</textarea>
            </label>
            <button type="submit">"Save"</button>
            <a href=format!("/hackathon/{id}")>"Cancel"</a>
        </form>
    }
}

// ---------------------------------------------------------------------------
// Page shell (plain HTML, wraps the Leptos-rendered body)
// ---------------------------------------------------------------------------

fn page_shell(title: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <title>Hackathon Radar | {title}</title>
  {STYLES}
</head>
<body>
  <header class="topbar"><a href="/" class="logo">Hackathon Radar</a> <a href="/api/hackathons">JSON</a></header>
  <main class="main">
    {body}
  </main>
  {SCRIPT}
</body>
</html>"#
    )
}

const SCRIPT: &str = r#"<script>
async function runScrape() {
  const status = document.getElementById('scrape-status');
  status.textContent = 'Searching...';
  const res = await fetch('/scrape', { method: 'POST', headers: { 'Content-Type': 'application/json' }, body: '{}' });
  const data = await res.json();
  if (data.success) {
    status.textContent = data.count > 0 ? `Added ${data.count} hackathons` : 'No new hackathons';
    if (data.count > 0) location.reload();
  } else {
    status.textContent = `Scrape failed: ${data.error}`;
  }
}

async function deleteHackathon(event) {
  if (!confirm('Delete this hackathon?')) return;
  const res = await fetch(`/delete/${event.currentTarget.dataset.id}`, { method: 'POST' });
  const data = await res.json();
  if (data.success) location.href = '/'; else alert(data.error || 'Delete failed');
}

document.getElementById('scrape')?.addEventListener('click', runScrape);
document.querySelectorAll('button.delete').forEach((b) => b.addEventListener('click', deleteHackathon));
</script>"#;

const STYLES: &str = r#"<style>
  body { font-family: system-ui, sans-serif; margin: 0; background: #f6f7f9; color: #1d2330; }
  .topbar { display: flex; gap: 1rem; align-items: center; padding: .75rem 1.5rem; background: #1d2330; }
  .topbar a { color: #fff; text-decoration: none; }
  .logo { font-weight: 700; }
  .main { max-width: 960px; margin: 0 auto; padding: 1.5rem; }
  .toolbar { display: flex; gap: 1rem; align-items: center; }
  .grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 1rem; }
  .card, .detail { background: #fff; border-radius: 8px; padding: 1rem; box-shadow: 0 1px 3px rgba(0,0,0,.08); }
  .card h2 { font-size: 1.1rem; margin: 0 0 .5rem; }
  .badge { display: inline-block; padding: 0 .5rem; border-radius: 999px; background: #e7ecf5; font-size: .8rem; }
  .meta { color: #5a6478; font-size: .9rem; }
  .alert { background: #fde8e8; color: #8a1c1c; padding: .75rem; border-radius: 6px; margin: 1rem 0; }
  .empty { color: #5a6478; }
  dl { display: grid; grid-template-columns: max-content 1fr; gap: .25rem 1rem; }
  dt { font-weight: 600; }
  form.edit { display: grid; gap: .75rem; max-width: 640px; }
  form.edit label { display: grid; gap: .25rem; }
</style>"#;
