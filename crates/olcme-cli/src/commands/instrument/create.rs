use olcme_console::messages;
use olcme_core::enums::TemplateKind;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;
use crate::ui;

pub async fn run(
    name: Option<&str>,
    template: &str,
    study: Option<i64>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let template = parse_enum::<TemplateKind>(template, "template")?;
    let mut dashboard = ctx.dashboard();
    dashboard.new_instrument_name = name.map_or_else(
        || ctx.config.general.default_instrument_name.clone(),
        str::to_string,
    );
    dashboard.template = template;

    // without --study the newest study is picked, as on the dashboard
    match study {
        Some(id) => dashboard.select_study(Some(id)),
        None => {
            let result = with_spinner("Studyler yükleniyor…", dashboard.refresh()).await;
            if result.is_err() {
                ui::show_status(dashboard.status());
            }
            result?;
        }
    }

    let result = with_spinner(messages::CREATING_INSTRUMENT, dashboard.create_instrument()).await;
    ui::show_status(dashboard.status());
    let created = result?;

    output(
        &json!({
            "instrument": created,
            "template": template,
            "template_label": template.label(),
        }),
        flags.format,
    )
}
