//! AI assistant commands
//!
//! Every AI-backed command checks the online flag first; the assistant
//! service itself never fails, it substitutes fallback content.

use std::path::Path;

use chrono::Local;
use healthprod_core::ShellActions;
use healthprod_domain::{AiPersonality, ChatRole, DailyReport, HealthProdError, MealImage, Result};

use crate::context::AppContext;

const OFFLINE: &str = "You're offline. Reconnect with `online on` to use the assistant.";

/// Largest meal photo accepted.
pub const MAX_MEAL_IMAGE_BYTES: u64 = 8 * 1024 * 1024;

pub(crate) fn render_report(report: &DailyReport) -> String {
    let mut out = format!(
        "Productivity score: {}/100\n{}\nRecommendations: {}\nTomorrow:",
        report.productivity_score, report.summary, report.recommendations
    );
    for item in &report.next_day_todo_list {
        out.push_str(&format!("\n  - {item}"));
    }
    out
}

pub async fn daily_report(ctx: &AppContext) -> String {
    match ctx.shell.generate_report().await {
        Some(report) => render_report(&report),
        None => OFFLINE.to_string(),
    }
}

pub async fn insights(ctx: &AppContext) -> String {
    let activities = {
        let state = ctx.state.read();
        if !state.is_online() {
            return OFFLINE.to_string();
        }
        state.activities().to_vec()
    };
    ctx.assistant.insights(&activities).await
}

pub async fn knowledge_card(ctx: &AppContext) -> String {
    let today = Local::now().date_naive();
    match ctx.knowledge.today(&ctx.assistant, today, ctx.is_online()).await {
        Some(card) => format!("{} [{}]\n{}", card.title, card.category, card.content),
        None => "No knowledge card for today yet. Go online to fetch one.".to_string(),
    }
}

pub async fn chat(ctx: &AppContext, message: &str) -> String {
    if !ctx.is_online() {
        return OFFLINE.to_string();
    }
    let mut session = ctx.chat.lock().await;
    let personality = session.personality();
    match session.send(&ctx.assistant, message).await {
        Some(reply) => format!("{personality}: {}", reply.text),
        None => String::new(),
    }
}

/// Show or switch the chat personality. Switching restarts the conversation.
pub async fn personality(ctx: &AppContext, personality: Option<AiPersonality>) -> String {
    let mut session = ctx.chat.lock().await;
    let Some(personality) = personality else {
        let choices: Vec<&str> = AiPersonality::ALL.iter().map(|p| p.label()).collect();
        return format!("Current: {}. Available: {}", session.personality(), choices.join(", "));
    };

    session.set_personality(personality);
    let greeting = session
        .messages()
        .iter()
        .find(|m| m.role == ChatRole::Model)
        .map(|m| m.text.clone())
        .unwrap_or_default();
    format!("{personality}: {greeting}")
}

/// Mime type for a meal photo, from its file extension.
pub(crate) fn image_mime_type(path: &Path) -> Result<&'static str> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "png" => Ok("image/png"),
        "webp" => Ok("image/webp"),
        "heic" => Ok("image/heic"),
        "heif" => Ok("image/heif"),
        _ => Err(HealthProdError::Validation(format!(
            "Unsupported image type: {}",
            path.display()
        ))),
    }
}

/// Read an image from disk, checking its type and size first.
pub(crate) async fn read_image(path: &Path) -> Result<MealImage> {
    let mime_type = image_mime_type(path)?;
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| HealthProdError::NotFound(format!("{}: {e}", path.display())))?;
    if metadata.len() > MAX_MEAL_IMAGE_BYTES {
        return Err(HealthProdError::Validation(format!(
            "Image too large: {} bytes (max {MAX_MEAL_IMAGE_BYTES})",
            metadata.len()
        )));
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| HealthProdError::Storage(format!("{}: {e}", path.display())))?;
    Ok(MealImage { mime_type: mime_type.to_string(), bytes })
}

pub async fn analyze_meal(ctx: &AppContext, path: &Path) -> Result<String> {
    let image = read_image(path).await?;
    if !ctx.is_online() {
        return Ok(OFFLINE.to_string());
    }
    Ok(ctx.assistant.analyze_meal(&image).await)
}
