use anyhow::{Context, bail};
use deeptrans_config::{Provider, ProviderKind};
use deeptrans_core::AppState;
use deeptrans_types::Language;
use tokio::io::AsyncReadExt;
use tokio_util::sync::CancellationToken;

use crate::cli::{Command, HistoryAction, ProvidersAction};

/// Whether a command changed anything worth saving
pub type Changed = bool;

pub async fn dispatch(state: &AppState, command: Command) -> anyhow::Result<Changed> {
    match command {
        Command::Translate {
            from,
            to,
            provider,
            text,
        } => translate(state, from, to, provider, text).await,
        Command::Providers { action } => providers(state, action.unwrap_or(ProvidersAction::List)).await,
        Command::Models { provider, refresh } => models(state, provider, refresh).await,
        Command::History { limit, action } => history(state, limit, action).await,
        Command::Languages => {
            print_languages();
            Ok(false)
        }
    }
}

fn language(code: &str) -> anyhow::Result<Language> {
    Language::find(code).with_context(|| format!("unknown language code '{code}', see `deeptrans languages`"))
}

async fn read_stdin() -> anyhow::Result<String> {
    let mut buf = String::new();
    tokio::io::stdin()
        .read_to_string(&mut buf)
        .await
        .context("reading text from stdin")?;
    Ok(buf)
}

async fn translate(
    state: &AppState,
    from: Option<String>,
    to: Option<String>,
    provider: Option<String>,
    text: Vec<String>,
) -> anyhow::Result<Changed> {
    let text = if text.is_empty() { read_stdin().await? } else { text.join(" ") };
    let from = language(from.as_deref().unwrap_or(&state.config.translator.from_lang))?;
    let to = language(to.as_deref().unwrap_or(&state.config.translator.to_lang))?;
    if to.is_auto() {
        bail!("target language cannot be auto");
    }

    let index = match provider {
        Some(name) => Some(state.providers.read().await.position(&name)?),
        None => None,
    };

    let cancel = CancellationToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("interrupted, cancelling translation");
                cancel.cancel();
            }
        })
    };

    let outcome = state.translate(&text, &from, &to, index, &cancel).await;
    interrupt.abort();

    match outcome? {
        Some(result) => {
            println!("{}", result.translated_text);
            Ok(true)
        }
        None => {
            tracing::warn!("nothing to translate");
            Ok(false)
        }
    }
}

async fn providers(state: &AppState, action: ProvidersAction) -> anyhow::Result<Changed> {
    let mut store = state.providers.write().await;

    match action {
        ProvidersAction::List => {
            let active = store.active_index();
            for (i, p) in store.iter().enumerate() {
                let marker = if i == active { '*' } else { ' ' };
                let key = if p.has_api_key() { "key set" } else { "no key" };
                print!("{marker} {}. {} [{}] model={} ({key})", i + 1, p.name, p.kind, p.model);
                match &p.endpoint {
                    Some(endpoint) => println!(" {endpoint}"),
                    None => println!(),
                }
            }
            return Ok(false);
        }
        ProvidersAction::Use { name } => {
            let index = store.position(&name)?;
            store.set_active(index)?;
            tracing::info!(provider = %store.active().name, "active provider changed");
        }
        ProvidersAction::SetKey { name, key } => {
            let index = store.position(&name)?;
            let provider = store.get_mut(index).context("provider disappeared")?;
            provider.api_key = key.trim().to_string();
            // a new key may unlock a different model list
            provider.cached_models = None;
            provider.models_fetched_at = None;
        }
        ProvidersAction::SetModel { name, model } => {
            let index = store.position(&name)?;
            let model = model.trim();
            if model.is_empty() {
                bail!("model cannot be empty");
            }
            store.get_mut(index).context("provider disappeared")?.model = model.to_string();
        }
        ProvidersAction::Add { kind, name, key } => {
            if kind == ProviderKind::Custom {
                bail!("use `providers add-custom` to add a custom endpoint");
            }
            let name = name.unwrap_or_else(|| kind.display_name().to_string());
            if store.position(&name).is_ok() {
                bail!("a provider named '{name}' already exists");
            }
            let index = store.add(Provider::new(name.trim(), kind, key.trim(), kind.default_model()));
            println!("added provider {}", index + 1);
        }
        ProvidersAction::AddCustom {
            name,
            endpoint,
            model,
            key,
        } => {
            if store.position(&name).is_ok() {
                bail!("a provider named '{name}' already exists");
            }
            let index = store.add(Provider::custom(name.trim(), endpoint.trim(), model.trim(), key.trim()));
            println!("added provider {}", index + 1);
        }
        ProvidersAction::Remove { name } => {
            let index = store.position(&name)?;
            let removed = store.remove(index)?;
            println!("removed {}; active provider is {}", removed.name, store.active().name);
        }
    }

    Ok(true)
}

async fn models(state: &AppState, provider: Option<String>, refresh: bool) -> anyhow::Result<Changed> {
    let mut provider = {
        let store = state.providers.read().await;
        let index = match provider {
            Some(name) => store.position(&name)?,
            None => store.active_index(),
        };
        store.get(index).cloned().context("provider disappeared")?
    };

    let max_age = state.config.model_cache_max_age();
    let cached = provider.cached_models.clone().unwrap_or_default();
    let models = match state.service.refresh_models(&mut provider, max_age, refresh).await {
        Ok(models) => models,
        Err(e) if !cached.is_empty() => {
            tracing::warn!(provider = %provider.name, "model refresh failed, showing cached list: {e}");
            cached
        }
        Err(e) => return Err(e.into()),
    };

    if models.is_empty() {
        println!("{} has no model list; current model: {}", provider.name, provider.model);
    } else {
        for model in &models {
            let marker = if *model == provider.model { '*' } else { ' ' };
            println!("{marker} {model}");
        }
    }

    state.providers.write().await.update(provider)?;
    Ok(true)
}

async fn history(state: &AppState, limit: usize, action: Option<HistoryAction>) -> anyhow::Result<Changed> {
    let mut history = state.history.write().await;

    match action {
        None => {
            for entry in history.iter().take(limit) {
                let id = entry.id.to_string();
                println!(
                    "{}  {}  {}->{}  {}  =>  {}",
                    &id[..8],
                    entry.timestamp.format("%Y-%m-%d %H:%M"),
                    entry.source_language.code,
                    entry.target_language.code,
                    entry.preview(40),
                    entry.translated_text.lines().next().unwrap_or_default(),
                );
            }
            Ok(false)
        }
        Some(HistoryAction::Clear) => {
            let count = history.len();
            history.clear();
            println!("cleared {count} entries");
            Ok(true)
        }
        Some(HistoryAction::Remove { id }) => {
            let Some(found) = history.find_by_prefix(&id).map(|e| e.id) else {
                bail!("no single history entry matches '{id}'");
            };
            history.remove(found);
            Ok(true)
        }
    }
}

fn print_languages() {
    let auto = Language::auto();
    println!("{} {:<6} {}", auto.flag, auto.code, auto.name);
    for lang in Language::supported() {
        println!("{} {:<6} {}", lang.flag, lang.code, lang.name);
    }
}
