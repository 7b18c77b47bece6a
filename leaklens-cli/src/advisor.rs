//! Best-effort remote budgeting advice with a deterministic local fallback.
//!
//! One attempt, no retry. Whatever goes wrong — no provider configured,
//! timeout, HTTP error, empty text — the caller still gets advice, composed
//! locally and flagged as degraded. This path must never fail an analysis.

use anyhow::{bail, Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

use leaklens_analytics::{compose_advice, AdviceResponse};
use leaklens_core::transaction::Summary;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

const ADVICE_SYSTEM: &str = "\
You are a friendly personal finance coach. You will be given a summary of a \
user's bank/UPI/card transactions for a few months. Explain where they are \
overspending, give 3-5 specific realistic actions for next month, and \
estimate roughly how much they could save per month and per year. Do not \
give investment advice or recommend financial products. Focus on spending \
control, budgeting habits, and lifestyle changes. Be encouraging and \
practical. Keep the answer under 250 words, in simple conversational \
English.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Anthropic,
    OpenAI,
}

#[derive(Debug, Clone)]
pub struct AdviceConfig {
    pub provider: Provider,
    pub model: String,
}

/// Pick a provider from the environment; None means offline-only.
pub fn default_config() -> Option<AdviceConfig> {
    let model_override = std::env::var("LEAKLENS_ADVICE_MODEL").ok();
    if std::env::var("ANTHROPIC_API_KEY").is_ok() {
        return Some(AdviceConfig {
            provider: Provider::Anthropic,
            model: model_override.unwrap_or_else(|| "claude-3-5-sonnet-latest".to_string()),
        });
    }
    if std::env::var("OPENAI_API_KEY").is_ok() {
        return Some(AdviceConfig {
            provider: Provider::OpenAI,
            model: model_override.unwrap_or_else(|| "gpt-4o-mini".to_string()),
        });
    }
    None
}

/// Flatten a summary into the compact context block the prompt consumes.
fn build_context(summary: &Summary) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("Total income this period: {}", summary.total_income));
    lines.push(format!("Total spending this period: {}", summary.total_spending));
    lines.push(format!("Net balance (income - spending): {}", summary.net));

    lines.push("Leaks:".to_string());
    lines.push(format!("  - Bank fees: {}", summary.leaks.bank_fees));
    lines.push(format!("  - Subscriptions: {}", summary.leaks.subscriptions));
    lines.push(format!("  - Food delivery: {}", summary.leaks.food_delivery));

    if !summary.top_merchants.is_empty() {
        lines.push("Top merchants (most spend first):".to_string());
        for m in summary.top_merchants.iter().take(5) {
            lines.push(format!("  - {}: {}", m.merchant, m.amount));
        }
    }

    if !summary.monthly.is_empty() {
        lines.push("Monthly spending trend (YYYY-MM -> spending):".to_string());
        for (month, flow) in &summary.monthly {
            lines.push(format!("  - {}: {}", month, flow.spending));
        }
    }

    lines.join("\n")
}

/// Get advice for a summary. Remote when configured and healthy, local
/// composer otherwise; the result says which one answered.
pub async fn advise(summary: &Summary) -> AdviceResponse {
    match remote_advice(summary).await {
        Ok(text) if !text.is_empty() => AdviceResponse { advice: text, degraded: false },
        Ok(_) => {
            warn!("advice service returned empty text; using local composer");
            AdviceResponse { advice: compose_advice(summary), degraded: true }
        }
        Err(e) => {
            warn!("advice service unavailable ({e:#}); using local composer");
            AdviceResponse { advice: compose_advice(summary), degraded: true }
        }
    }
}

async fn remote_advice(summary: &Summary) -> Result<String> {
    let Some(config) = default_config() else {
        bail!("no advice provider configured (set ANTHROPIC_API_KEY or OPENAI_API_KEY)");
    };

    let prompt = format!(
        "Here is the transaction summary:\n\n{}\n\nNow give your advice:",
        build_context(summary)
    );

    match config.provider {
        Provider::Anthropic => anthropic_complete(&config.model, &prompt).await,
        Provider::OpenAI => openai_complete(&config.model, &prompt).await,
    }
}

async fn anthropic_complete(model: &str, prompt: &str) -> Result<String> {
    let key = std::env::var("ANTHROPIC_API_KEY").context("read ANTHROPIC_API_KEY")?;

    #[derive(Serialize)]
    struct Msg {
        role: String,
        content: String,
    }

    #[derive(Serialize)]
    struct Req {
        model: String,
        max_tokens: i32,
        system: String,
        messages: Vec<Msg>,
    }

    #[derive(Deserialize)]
    struct Resp {
        content: Vec<ContentBlock>,
    }

    #[derive(Deserialize)]
    struct ContentBlock {
        #[serde(rename = "type")]
        t: String,
        text: Option<String>,
    }

    let body = Req {
        model: model.to_string(),
        max_tokens: 450,
        system: ADVICE_SYSTEM.to_string(),
        messages: vec![Msg { role: "user".to_string(), content: prompt.to_string() }],
    };

    let mut headers = HeaderMap::new();
    headers.insert("x-api-key", HeaderValue::from_str(&key)?);
    headers.insert("anthropic-version", HeaderValue::from_static("2023-06-01"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
    let resp = client
        .post("https://api.anthropic.com/v1/messages")
        .headers(headers)
        .json(&body)
        .send()
        .await
        .context("anthropic request")?;

    let status = resp.status();
    if !status.is_success() {
        let txt = resp.text().await.unwrap_or_default();
        bail!("anthropic error: {status} {txt}");
    }

    let out: Resp = resp.json().await.context("parse anthropic response")?;
    let mut s = String::new();
    for b in out.content {
        if b.t == "text" {
            if let Some(t) = b.text {
                s.push_str(&t);
            }
        }
    }
    Ok(s.trim().to_string())
}

async fn openai_complete(model: &str, prompt: &str) -> Result<String> {
    let key = std::env::var("OPENAI_API_KEY").context("read OPENAI_API_KEY")?;

    #[derive(Serialize)]
    struct Msg {
        role: String,
        content: String,
    }

    #[derive(Serialize)]
    struct Req {
        model: String,
        messages: Vec<Msg>,
        temperature: f32,
    }

    #[derive(Deserialize)]
    struct Resp {
        choices: Vec<Choice>,
    }

    #[derive(Deserialize)]
    struct Choice {
        message: MsgOut,
    }

    #[derive(Deserialize)]
    struct MsgOut {
        content: Option<String>,
    }

    let body = Req {
        model: model.to_string(),
        messages: vec![
            Msg { role: "system".to_string(), content: ADVICE_SYSTEM.to_string() },
            Msg { role: "user".to_string(), content: prompt.to_string() },
        ],
        temperature: 0.4,
    };

    let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
    let resp = client
        .post("https://api.openai.com/v1/chat/completions")
        .header(AUTHORIZATION, format!("Bearer {key}"))
        .json(&body)
        .send()
        .await
        .context("openai request")?;

    let status = resp.status();
    if !status.is_success() {
        let txt = resp.text().await.unwrap_or_default();
        bail!("openai error: {status} {txt}");
    }

    let out: Resp = resp.json().await.context("parse openai response")?;
    let content = out
        .choices
        .first()
        .and_then(|c| c.message.content.clone())
        .unwrap_or_default();

    Ok(content.trim().to_string())
}
