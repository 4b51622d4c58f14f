use std::path::Path;
use console::style;
use serde_json::json;
use crate::api::create_app_state;
use crate::cli::commands::PredictArgs;
use crate::config;
use crate::errors::OncoscopicError;
use crate::models::{ImagePayload, OrchestrationOutcome};
use crate::prompts::Language;
use crate::reporting::format_diagnosis_summary;
use tracing::info;

pub async fn handle_predict(args: PredictArgs) -> Result<(), OncoscopicError> {
    let settings = config::load_settings(args.config.as_deref().map(Path::new)).await?;
    let state = create_app_state(&settings)?;

    let image = ImagePayload::from_path(Path::new(&args.image)).await?;
    info!(path = %args.image, size = image.len(), media_type = %image.media_type, "Analysing image");

    let outcome = state.predictor.run(Some(image)).await;
    let lang = Language::from_code(Some(&args.lang));

    let explanation = match (&outcome, args.explain) {
        (OrchestrationOutcome::Success(prediction), true) => {
            Some(state.followup.explain(&prediction.result, lang).await?)
        }
        _ => None,
    };

    if args.json {
        let body = match &outcome {
            OrchestrationOutcome::Success(p) => json!({"prediction": p, "explanation": explanation}),
            OrchestrationOutcome::Failure(f) => json!({"failure": f, "status": f.status()}),
        };
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print_outcome(&outcome, explanation.as_deref());
    }

    match outcome {
        OrchestrationOutcome::Success(_) => Ok(()),
        OrchestrationOutcome::Failure(f) => Err(OncoscopicError::Prediction(f.kind)),
    }
}

fn print_outcome(outcome: &OrchestrationOutcome, explanation: Option<&str>) {
    match outcome {
        OrchestrationOutcome::Success(prediction) => {
            println!("{}", format_diagnosis_summary(&prediction.result));
            if let Some(text) = explanation {
                println!("{}\n\n{}\n", style("Detailed Analysis").bold(), text.trim());
            }
        }
        OrchestrationOutcome::Failure(failure) => {
            println!("{} {}", style("\u{2718}").red().bold(), style(&failure.message).red());
            if let Some(details) = &failure.details {
                println!("  {}", style(details).dim());
            }
        }
    }
    println!("{}", style(outcome.disclaimer()).dim());
}
