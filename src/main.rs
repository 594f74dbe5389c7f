mod api;
mod config;
mod oauth;
mod query;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api::ApiClient,
    config::Config,
    oauth::{ClientSecrets, ConsolePrompt, CredentialManager, OAuthClient, TokenCache},
    query::SampleQuery,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Diagnostics go to stderr; stdout is reserved for the prompt and our results.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let secrets = ClientSecrets::from_file(&config.client_secrets_filename).with_context(|| {
        format!(
            "unable to load client secrets from {}",
            config.client_secrets_filename.display()
        )
    })?;
    let oauth = OAuthClient::new(secrets.clone());

    // Use our cached token if we have one, or walk the user through authorizing us.
    let mut credentials = CredentialManager::new(
        &secrets,
        TokenCache::default(),
        ConsolePrompt::stdin(),
        oauth.clone(),
    );
    let token = credentials
        .obtain()
        .await
        .context("unable to obtain credentials")?;
    let mut api = ApiClient::new(token, oauth)?;

    let query = SampleQuery::default();

    let bases = query::lookup_bases(&mut api, &query)
        .await
        .context("unable to look up read bases")?;
    tracing::info!("counted bases across {} reads", bases.total());
    println!(
        "{} bases on {} at {} are",
        query.sample, query.reference_name, query.position
    );
    print!("{bases}");

    let called = query::lookup_genotype(&mut api, &query)
        .await
        .context("unable to look up called genotype")?;
    println!(
        "the called genotype is {} for {}",
        called.genotype, called.variant_name
    );

    Ok(())
}
