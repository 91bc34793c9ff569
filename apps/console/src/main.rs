use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use client_core::{HttpSurveyApi, SurveyStore};
use shared::domain::SurveyId;
use tracing::info;

mod config;

#[derive(Parser, Debug)]
struct Args {
    /// Overrides client.toml and SURVEY_SERVER_URL.
    #[arg(long)]
    server_url: Option<String>,
    /// Survey to open after listing.
    #[arg(long)]
    survey_id: Option<i64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings = config::load_settings();
    if let Some(url) = args.server_url {
        settings.server_url = url;
    }
    info!(server_url = %settings.server_url, "survey console starting");

    let api = HttpSurveyApi::new(&settings.server_url)?;
    let store = SurveyStore::with_api(Arc::new(api));

    store.load_surveys().await?;
    let surveys = store.surveys().await;
    println!("{} survey(s) available:", surveys.len());
    for survey in &surveys {
        println!("  #{} {}", survey.survey_id.0, survey.title);
    }

    if let Some(id) = args.survey_id {
        store.load_survey(SurveyId(id)).await?;
        if let Some(survey) = store.current_survey().await {
            println!("\n{}", survey.title);
            if let Some(description) = &survey.description {
                println!("{description}");
            }
            for question in &survey.questions {
                let choice = question.choice.as_deref().unwrap_or("-");
                println!("  [{choice}] {}", question.text);
                for answer in &question.answers {
                    println!("      * {answer}");
                }
            }
        }
    }

    Ok(())
}
