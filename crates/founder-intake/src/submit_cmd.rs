use std::path::Path;

use anyhow::{Context, Result, bail};
use fi_client::{FormRegistry, FormSubmitter, TerminalUi};
use fi_core::FormFields;

const SUBMIT_LABEL: &str = "Submit";

pub(crate) struct SubmitArgs {
    pub form: String,
    pub url: String,
    pub fields: Vec<(String, String)>,
    pub json: Option<std::path::PathBuf>,
    pub redirect: Option<String>,
}

/// JSON file values first, then `--field` pairs on top.
fn collect_fields(json: Option<&Path>, pairs: Vec<(String, String)>) -> Result<FormFields> {
    let mut fields = match json {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read fields file: {}", path.display()))?;
            FormFields::from_json_body(&content)
                .with_context(|| format!("Failed to parse fields file: {}", path.display()))?
        }
        None => FormFields::new(),
    };
    for (key, value) in pairs {
        fields.insert(key, value);
    }
    Ok(fields)
}

pub(crate) async fn handle_submit(args: SubmitArgs) -> Result<()> {
    let registry = FormRegistry::standard();
    let Some(form) = registry.get(&args.form) else {
        let known: Vec<&str> = registry.ids().collect();
        bail!("unknown form '{}' (known: {})", args.form, known.join(", "));
    };
    let mut form = form.clone();
    if let Some(target) = args.redirect {
        form = form.with_redirect(target);
    }

    let fields = collect_fields(args.json.as_deref(), args.fields)?;
    let submitter = FormSubmitter::new(&args.url)?;
    tracing::debug!(form = %form.id, url = %submitter.endpoint_url(&form), fields = fields.len(), "submitting");

    let mut ui = TerminalUi::new(SUBMIT_LABEL);
    let outcome = submitter.submit(&form, &fields, &mut ui).await;
    if !outcome.is_success() {
        bail!("submission of '{}' failed", form.id);
    }
    Ok(())
}
