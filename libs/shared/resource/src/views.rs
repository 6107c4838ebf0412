use chrono::NaiveDate;

use shared_utils::dates::iso;
use shared_utils::html::{alert, escape, stat_card};

use crate::config::{FieldKind, ResourceConfig, Stat};
use crate::controller::LookupOptions;
use crate::form::FormData;

pub fn render_stats(stats: &[Stat]) -> String {
    let cards: String = stats
        .iter()
        .map(|stat| stat_card(stat.id, stat.label, &stat.value))
        .collect();
    format!(r#"<div class="row mb-4" id="stats">{}</div>"#, cards)
}

fn actions<T>(config: &ResourceConfig<T>, id: Option<i64>) -> String {
    let Some(id) = id else {
        return String::new();
    };
    let base = config.base_path;
    format!(
        r#"<div class="btn-group btn-group-sm"><a href="{base}/{id}" class="btn btn-outline-primary" title="Ver detalles"><i class="bi bi-eye"></i></a><a href="{base}/{id}/edit" class="btn btn-outline-secondary" title="Editar"><i class="bi bi-pencil"></i></a><form method="post" action="{base}/{id}/delete" class="d-inline" onsubmit="return confirm('¿Está seguro de eliminar este registro?')"><button class="btn btn-outline-danger" title="Eliminar"><i class="bi bi-trash"></i></button></form></div>"#,
        base = base,
        id = id
    )
}

pub fn render_table<T>(config: &ResourceConfig<T>, records: &[T], today: NaiveDate) -> String {
    let headers: String = config
        .table_headers
        .iter()
        .map(|h| format!("<th>{}</th>", escape(h)))
        .collect();

    let rows: String = if records.is_empty() {
        format!(
            r#"<tr><td colspan="{}" class="text-center">{}</td></tr>"#,
            config.table_headers.len() + 1,
            escape(config.empty_message)
        )
    } else {
        records
            .iter()
            .map(|record| {
                format!(
                    "<tr>{}<td>{}</td></tr>",
                    (config.row_template)(record, today),
                    actions(config, (config.id_of)(record))
                )
            })
            .collect()
    };

    format!(
        r#"<table class="table table-hover align-middle"><thead><tr>{}<th>Acciones</th></tr></thead><tbody>{}</tbody></table>"#,
        headers, rows
    )
}

/// Content of the `#results` container, replaced on every applied search.
pub fn render_results<T>(
    config: &ResourceConfig<T>,
    records: &[T],
    stats: Option<&[Stat]>,
    today: NaiveDate,
) -> String {
    let stats = stats.map(render_stats).unwrap_or_default();
    format!("{}{}", stats, render_table(config, records, today))
}

pub fn render_list<T>(
    config: &ResourceConfig<T>,
    records: &[T],
    stats: &[Stat],
    notice: Option<&str>,
    today: NaiveDate,
) -> String {
    let base = config.base_path;
    let notice = notice.map(|msg| alert("success", msg)).unwrap_or_default();

    // Stats that follow the search live inside #results.
    let (outer_stats, inner_stats) = if config.restats_on_search() {
        (String::new(), Some(stats))
    } else {
        (render_stats(stats), None)
    };

    format!(
        r#"{notice}{outer_stats}
<div class="d-flex mb-3 gap-2">
  <input type="search" id="searchInput" class="form-control" placeholder="{placeholder}" autocomplete="off" />
  <a href="{base}/new" class="btn btn-primary text-nowrap"><i class="bi bi-plus"></i> Nuevo</a>
</div>
{toolbar}
<div id="results">{results}</div>
<script>
  document.getElementById('searchInput').addEventListener('input', async (e) => {{
    const res = await fetch('{base}/search?q=' + encodeURIComponent(e.target.value.trim()));
    if (res.redirected) {{ window.location.href = res.url; return; }}
    if (res.status === 200) document.getElementById('results').innerHTML = await res.text();
  }});
</script>"#,
        notice = notice,
        outer_stats = outer_stats,
        placeholder = escape(config.search_placeholder),
        base = base,
        toolbar = config.toolbar,
        results = render_results(config, records, inner_stats, today),
    )
}

pub fn render_form<T>(
    config: &ResourceConfig<T>,
    action: &str,
    values: &FormData,
    options: &LookupOptions,
    today: NaiveDate,
) -> String {
    let fields: String = config
        .form_fields
        .iter()
        .map(|field| {
            let value = values.get(field.name).unwrap_or_default();
            let required = if config.required_fields.contains(&field.name) { " required" } else { "" };
            let input = match field.kind {
                FieldKind::Text => input_tag("text", field.name, value, required),
                FieldKind::Email => input_tag("email", field.name, value, required),
                FieldKind::Tel => input_tag("tel", field.name, value, required),
                FieldKind::Time => input_tag("time", field.name, value, required),
                FieldKind::Date { default_today } => {
                    let today = iso(today);
                    let value = if value.is_empty() && default_today { today.as_str() } else { value };
                    input_tag("date", field.name, value, required)
                }
                FieldKind::TextArea => format!(
                    r#"<textarea class="form-control" id="{name}" name="{name}" rows="3">{value}</textarea>"#,
                    name = field.name,
                    value = escape(value)
                ),
                FieldKind::Select(choices) => {
                    let opts: Vec<(String, String)> =
                        choices.iter().map(|c| (c.to_string(), c.to_string())).collect();
                    select_tag(field.name, value, &opts, required)
                }
                FieldKind::Lookup { .. } => {
                    let opts = options.get(field.name).map(Vec::as_slice).unwrap_or(&[]);
                    select_tag(field.name, value, opts, required)
                }
            };
            format!(
                r#"<div class="mb-3"><label class="form-label" for="{}">{}</label>{}</div>"#,
                field.name,
                escape(field.label),
                input
            )
        })
        .collect();

    format!(
        r#"<form method="post" action="{action}" class="card card-body">{fields}<div class="d-flex gap-2"><button type="submit" class="btn btn-primary">Guardar</button><a href="{base}" class="btn btn-outline-secondary">Cancelar</a></div></form>"#,
        action = escape(action),
        fields = fields,
        base = config.base_path
    )
}

fn input_tag(kind: &str, name: &str, value: &str, required: &str) -> String {
    format!(
        r#"<input type="{kind}" class="form-control" id="{name}" name="{name}" value="{value}"{required} />"#,
        kind = kind,
        name = name,
        value = escape(value),
        required = required
    )
}

/// A current value missing from `options` is kept as an extra option so a
/// resubmitted form does not drop it.
fn select_tag(name: &str, selected: &str, options: &[(String, String)], required: &str) -> String {
    let mut opts: String = options
        .iter()
        .map(|(value, label)| {
            let sel = if value == selected { " selected" } else { "" };
            format!(r#"<option value="{}"{}>{}</option>"#, escape(value), sel, escape(label))
        })
        .collect();
    if !selected.is_empty() && !options.iter().any(|(value, _)| value == selected) {
        opts.push_str(&format!(
            r#"<option value="{0}" selected>{0}</option>"#,
            escape(selected)
        ));
    }
    format!(
        r#"<select class="form-select" id="{name}" name="{name}"{required}><option value="">Seleccionar...</option>{opts}</select>"#,
        name = name,
        required = required,
        opts = opts
    )
}

pub fn render_detail<T>(config: &ResourceConfig<T>, record: &T) -> String {
    let id = (config.id_of)(record);
    let edit = id
        .map(|id| format!(r#"<a href="{}/{}/edit" class="btn btn-outline-secondary">Editar</a>"#, config.base_path, id))
        .unwrap_or_default();
    format!(
        r#"<div class="card card-body">{}<div class="d-flex gap-2 mt-3">{}<a href="{}" class="btn btn-outline-primary">Volver</a></div></div>"#,
        (config.detail_template)(record),
        edit,
        config.base_path
    )
}
