use log::info;
use std::fs;
use std::time::Duration;

use crate::api::client::{DocumentApi, HttpDocumentClient};
use crate::category;
use crate::cli::args::{GenerateArgs, TriggerArg};
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::{HukukError, Result};
use crate::flow::{DocumentRequestFlow, Trigger};
use crate::form::{
    container_id, FieldElement, FieldKind, FormSource, StaticForm, CATEGORY_FIELD, DESCRIPTION_FIELD,
    TEMPLATE_FIELD,
};
use crate::notify::ConsoleNotifier;
use crate::output::{self, TerminalSurface};
use crate::progress::{messages, ProgressManager};

/// Execute generate command
pub async fn execute(args: GenerateArgs, format: OutputFormat, quiet: bool, verbose: bool) -> Result<()> {
    let config = Config::load()?;
    let mut client_config = config.client_config();
    if let Some(base_url) = &args.base_url {
        client_config.base_url = base_url.clone();
    }
    let client = HttpDocumentClient::new(client_config)?;
    let base_url = client.base_url().to_string();

    let form = build_form(&args)?;
    let template_name = form.value_of(TEMPLATE_FIELD).unwrap_or_default();
    let surface = TerminalSurface::new(ProgressManager::new(quiet, verbose))
        .with_loading_message(messages::generating_template(&template_name));

    let mut flow = DocumentRequestFlow::new(form, client, surface, ConsoleNotifier::new(quiet))
        .with_notification_duration(Duration::from_secs(config.ui.notification_seconds));

    let trigger = match args.trigger {
        TriggerArg::Button => Trigger::ButtonClick,
        TriggerArg::Submit => Trigger::FormSubmit,
    };
    let response = flow.handle(trigger).await?;

    if let Some(path) = &args.save {
        fs::write(path, serde_json::to_string_pretty(&response)?)?;
        info!("Saved response to {}", path.display());
    }

    let (_, _, surface, _) = flow.into_parts();
    let output = output::format_surface(surface.content(), format, Some(&base_url))?;
    println!("{}", output);
    Ok(())
}

/// Combine the form snapshot file with command line values; flags win
pub fn build_form(args: &GenerateArgs) -> Result<StaticForm> {
    let mut form = match &args.form {
        Some(path) => StaticForm::from_file(path)?,
        None => StaticForm::new(),
    };

    if let Some(template) = &args.template {
        form.set_value(TEMPLATE_FIELD, template.clone());
    }
    if let Some(category) = &args.category {
        form.set_value(CATEGORY_FIELD, category.clone());
    }
    if let Some(description) = &args.description {
        form.set_value(DESCRIPTION_FIELD, description.clone());
    }

    let template_name = form.value_of(TEMPLATE_FIELD).unwrap_or_default();
    for field in &args.fields {
        let (key, value) = field
            .split_once('=')
            .filter(|(key, _)| !key.trim().is_empty())
            .ok_or_else(|| HukukError::InvalidInput(format!("Expected KEY=VALUE, got '{}'", field)))?;
        if template_name.is_empty() {
            return Err(HukukError::InvalidInput(
                "--field needs a template; pass --template first".to_string(),
            ));
        }
        form.set_field(
            &container_id(&template_name),
            FieldElement::new(key.trim(), value, FieldKind::Input),
        );
    }

    let has_category = form
        .value_of(CATEGORY_FIELD)
        .map(|c| !c.trim().is_empty())
        .unwrap_or(false);
    if args.suggest_category && !has_category {
        let description = form.value_of(DESCRIPTION_FIELD).unwrap_or_default();
        let suggested = category::suggest(&template_name, &description);
        info!("Using suggested category {}", suggested);
        form.set_value(CATEGORY_FIELD, suggested);
    }

    Ok(form)
}
