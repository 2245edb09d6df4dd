use crate::controller::AppState;
use crate::render::{self, Card, Content, PageLink, Theme};

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn render_card(card: &Card<'_>) -> String {
    let name = escape_html(&card.name);
    format!(
        r#"    <div class="country-card rounded-xl border border-slate-200 dark:border-slate-800 bg-white dark:bg-slate-900 shadow-sm cursor-pointer overflow-hidden" data-card="{position}" tabindex="0" role="button" aria-pressed="false" aria-label="View details for {name}">
      <img src="{flag}" class="w-full h-32 object-cover" alt="Flag of {name}"/>
      <div class="p-4">
        <h5 class="font-bold text-lg">{name}</h5>
        <p class="text-sm"><strong>Region:</strong> {region}</p>
        <p class="text-sm"><strong>Population:</strong> {population}</p>
      </div>
    </div>
"#,
        position = card.position,
        flag = escape_html(&card.flag_url),
        region = escape_html(&card.region),
        population = escape_html(&card.population),
    )
}

fn render_dialog(card: &Card<'_>) -> String {
    let detail = card.activate();
    let name = escape_html(&detail.name);
    let mut rows = String::new();
    for (label, value) in detail.rows() {
        rows.push_str(&format!(
            "          <p><strong>{label}:</strong> {}</p>\n",
            escape_html(value)
        ));
    }
    format!(
        r#"  <dialog id="detail-{position}" class="rounded-2xl p-0 max-w-3xl w-full bg-white dark:bg-slate-900 text-slate-900 dark:text-slate-100">
    <div class="grid md:grid-cols-2 gap-6 p-6">
      <img src="{flag}" alt="Flag of {name}" class="w-full mb-3"/>
      <div>
        <h3 class="text-2xl font-bold mb-2">{name}</h3>
{rows}      </div>
    </div>
    <form method="dialog" class="px-6 pb-6 text-right"><button class="rounded-lg px-4 py-2 bg-slate-200 dark:bg-slate-700">Close</button></form>
  </dialog>
"#,
        position = card.position,
        flag = escape_html(&detail.flag_url),
    )
}

fn render_pagination(links: &[PageLink]) -> String {
    let mut out = String::from("  <nav aria-label=\"Pagination\"><ul class=\"flex gap-2 justify-center my-8\">\n");
    for link in links {
        let classes = match link {
            PageLink::Number { active: true, .. } => "bg-blue-600 text-white",
            _ if link.is_disabled() => "opacity-50",
            _ => "bg-slate-100 dark:bg-slate-800",
        };
        let target = link
            .target()
            .map(|p| format!(" data-page=\"{p}\""))
            .unwrap_or_default();
        out.push_str(&format!(
            "    <li><span class=\"page-link rounded-lg px-3 py-2 {classes}\" aria-label=\"{}\"{target}>{}</span></li>\n",
            escape_html(&link.aria_label()),
            escape_html(&link.label())
        ));
    }
    out.push_str("  </ul></nav>\n");
    out
}

/// A standalone page with the current grid, pagination and one dialog per card.
pub fn render_html(state: &AppState<'_>) -> Vec<u8> {
    let screen = state.screen();
    let body_class = match state.theme {
        Theme::Light => "",
        Theme::Dark => "dark",
    };

    let mut grid = String::new();
    let mut dialogs = String::new();
    match &screen.content {
        Content::Cards(cards) => {
            for card in cards {
                grid.push_str(&render_card(card));
                dialogs.push_str(&render_dialog(card));
            }
        }
        Content::Empty => {
            grid.push_str(&format!(
                "    <p class=\"text-center col-span-full\">{}</p>\n",
                render::EMPTY_MESSAGE
            ));
        }
        Content::Error(message) => {
            grid.push_str(&format!(
                "    <p class=\"text-red-600 col-span-full\">{}</p>\n",
                escape_html(message)
            ));
        }
    }
    let pagination = screen
        .pagination
        .as_ref()
        .map(|p| render_pagination(&p.links))
        .unwrap_or_default();

    let html = format!(
        r####"<!DOCTYPE html>
<html lang="en" class="{body_class}">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>Countries</title>
  <script src="https://cdn.tailwindcss.com"></script>
  <script>tailwind.config = {{ darkMode: "class" }};</script>
</head>
<body class="bg-slate-50 dark:bg-slate-950 text-slate-900 dark:text-slate-100 min-h-screen">
  <main class="max-w-[1440px] mx-auto px-8 py-10">
    <h1 class="text-4xl font-bold mb-2">Countries</h1>
    <p class="text-slate-500 mb-8">{summary}</p>
    <div id="countriesContainer" class="grid grid-cols-1 sm:grid-cols-2 md:grid-cols-3 lg:grid-cols-4 gap-5">
{grid}    </div>
{pagination}  </main>
{dialogs}  <script>
    (function() {{
      function open(card) {{
        const dialog = document.getElementById('detail-' + card.getAttribute('data-card'));
        if (dialog) dialog.showModal();
      }}
      for (const card of document.querySelectorAll('.country-card')) {{
        card.addEventListener('click', function() {{ open(card); }});
        card.addEventListener('keydown', function(e) {{
          if (e.key === 'Enter' || e.key === ' ') {{
            e.preventDefault();
            open(card);
          }}
        }});
      }}
    }})();
  </script>
</body>
</html>
"####,
        summary = escape_html(&format!(
            "{} of {} countries, page {} of {}",
            state.view.filtered.len(),
            state.dataset().len(),
            state.view.current_page,
            state.view.page_count().max(1)
        )),
    );

    html.into_bytes()
}
