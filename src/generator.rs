use std::time::Duration;

use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::{json, Value};
use spdlog::debug;

use crate::article::{Article, ArticleContent, Category};
use crate::error::{SiteError, SiteResult};
use crate::text_utils::today_short_pt;

/// Environment variable holding the generative-service credential. The only
/// configuration that does not live in the TOML file.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Hard cap on user-supplied topic text before it is interpolated into the
/// prompt. Everything past the cap is dropped, not rejected.
const TOPIC_BUDGET: usize = 200;

const SYSTEM_INSTRUCTION: &str = "\
You are the Lead Editor of a specialized Freemium Blog for the Brazilian Civil Construction Market (Construction, Architecture, Renovation).
Your Audience: Small/Medium Builders, Renovation Companies, Marble Shops, Joineries, Architects, Engineers.

TONE OF VOICE (CRITICAL):
1. Provocative but Professional: Question the status quo. \"Why most builders fail at sales.\"
2. Direct & No Fluff: Go straight to the point.
3. Result-Oriented: ALWAYS use numbers (R$, %, Days, ROI).
4. \"Inside Information\" Vibe: Make the reader feel they are getting confidential industry secrets.
5. Technical but Accessible: Use terms like CUB, VGV, CAC, LTV, but explain them simply.

CONTENT STRUCTURE (FREEMIUM 70/30 RULE):
- The content must be structured so that the Intro and First Section deliver 70% of the value (The Context, The Problem, The Framework).
- The subsequent sections (which will be hidden behind a paywall) should contain the \"Heavy Lifting\": Step-by-step implementation, specific scripts, detailed templates, and advanced tools.

Do NOT use generic motivational phrases. Use real examples: \"A marble shop in SP\", \"An architect in BH\".";

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    static ref ARTICLE_SCHEMA: Value = json!({
        "type": "OBJECT",
        "properties": {
            "intro": { "type": "STRING", "description": "Hook with specific construction market context." },
            "sections": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "heading": { "type": "STRING", "description": "Provocative subheading (e.g. 'O Erro de R$50k')" },
                        "body": { "type": "STRING", "description": "Detailed analysis. Use bolding for emphasis." }
                    }
                }
            },
            "conclusion": { "type": "STRING", "description": "Final verdict." }
        }
    });
    static ref TRENDING_SCHEMA: Value = json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "STRING" },
                "title": { "type": "STRING" },
                "excerpt": { "type": "STRING" },
                "author": { "type": "STRING" },
                "readTime": { "type": "STRING" },
                "category": {
                    "type": "STRING",
                    "enum": ["Métodos Rápidos", "Estudos de Caso", "Hacks de Marketing", "Contingência"]
                },
                "tags": { "type": "ARRAY", "items": { "type": "STRING" } }
            }
        }
    });
}

/// Sanitization boundary between user-supplied topic text and the prompt:
/// control characters are stripped, whitespace runs collapse to one space and
/// the length is capped. The topic stays free text past that.
pub fn sanitize_topic(topic: &str) -> String {
    let cleaned: String = topic
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let collapsed = WHITESPACE_RUN.replace_all(cleaned.trim(), " ");
    collapsed.chars().take(TOPIC_BUDGET).collect()
}

fn article_prompt(topic: &str, is_premium: bool) -> String {
    let locked = if is_premium { "This will be locked." } else { "" };
    format!(
        "Write a deep-dive article about: \"{topic}\".\n\
         Context: Construction Civil / Architecture Market in Brazil.\n\n\
         Structure requirements:\n\
         1. Intro: Hook the reader with a hard truth or specific problem in the construction business.\n\
         2. Section 1 (The Strategy/Framework): Explain the 'What' and 'Why'. This is accessible to everyone.\n\
         3. Section 2 (Operational Detail): {locked} specific step-by-step, CRM setups, script examples.\n\
         4. Section 3 (Metrics & Errors): {locked} Specific numbers (ROI, CAC), common mistakes to avoid.\n\
         5. Conclusion: Final verdict and Call to Action."
    )
}

const TRENDING_PROMPT: &str = "\
Generate 4 trending, high-click-through-rate article ideas for the Construction & Architecture market.
Topics: Sales processes for builders, capturing clients for architects, managing renovation leads, marketing for marble/glass companies.

Categories must be one of: 'Métodos Rápidos', 'Estudos de Caso', 'Hacks de Marketing', 'Contingência'.

Titles should be provocative, like \"Por Que Depender de Indicação Vai Quebrar Sua Marcenaria\".";

/// Cover URL for a custom-topic article: fixed blueprint prompt, caller
/// seed.
pub fn blueprint_cover_url(seed: &str) -> String {
    image_url("3d construction blueprint isometric pixar style", 800, 600, seed)
}

/// Cover URL for generated ideas and the editor's regenerate affordance; the
/// seed participates in the image prompt as well.
pub fn animated_cover_url(seed: &str) -> String {
    let prompt = format!(
        "3d render cute construction worker character, civil engineering site, isometric, \
         pixar style, vibrant colors, high quality, {}",
        seed
    );
    image_url(&prompt, 1200, 600, seed)
}

fn image_url(prompt: &str, width: u32, height: u32, seed: &str) -> String {
    let mut url = Url::parse("https://image.pollinations.ai/").expect("static base URL");
    url.path_segments_mut()
        .expect("https URL has segments")
        .pop_if_empty()
        .push("prompt")
        .push(prompt);
    url.query_pairs_mut()
        .append_pair("width", &width.to_string())
        .append_pair("height", &height.to_string())
        .append_pair("nologo", "true")
        .append_pair("seed", seed);
    url.to_string()
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrendingIdea {
    id: String,
    title: String,
    excerpt: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    read_time: String,
    category: String,
    #[serde(default)]
    tags: Vec<String>,
}

/// Typed client for the generative-text service. One request per user
/// action, bounded by the configured timeout; no retry, no streaming.
pub struct GeneratorClient {
    http: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeneratorClient {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> SiteResult<GeneratorClient> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SiteError::NetworkFailure(e.to_string()))?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(GeneratorClient {
            http,
            base_url,
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    async fn generate(&self, prompt: &str, response_schema: &Value) -> SiteResult<String> {
        let request = json!({
            "system_instruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema,
            }
        });

        debug!("requesting generation from {}", self.endpoint());
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(300).collect();
            return Err(SiteError::NetworkFailure(format!(
                "generation endpoint returned {}: {}",
                status, body
            )));
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| SiteError::SchemaMismatch(format!("unreadable response envelope: {}", e)))?;

        let text: String = payload
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| {
                c.parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .concat()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(SiteError::SchemaMismatch("service returned no text".to_string()));
        }
        Ok(text)
    }

    /// Produces a full article body for the topic. Anything that does not
    /// strictly match the declared shape is rejected, never partially
    /// rendered.
    pub async fn generate_article_content(
        &self,
        topic: &str,
        is_premium: bool,
    ) -> SiteResult<ArticleContent> {
        let topic = sanitize_topic(topic);
        let prompt = article_prompt(&topic, is_premium);
        let text = self.generate(&prompt, &ARTICLE_SCHEMA).await?;

        let content: ArticleContent = serde_json::from_str(&text)
            .map_err(|e| SiteError::SchemaMismatch(e.to_string()))?;
        validate_content(&content)?;
        Ok(content)
    }

    /// Asks for four trending article ideas (metadata only) and decorates
    /// each with a generated cover URL and a random premium flag. Defined to
    /// match the original surface; not wired into a shipped route.
    pub async fn trending_ideas(&self) -> SiteResult<Vec<Article>> {
        let text = self.generate(TRENDING_PROMPT, &TRENDING_SCHEMA).await?;

        let ideas: Vec<TrendingIdea> = serde_json::from_str(&text)
            .map_err(|e| SiteError::SchemaMismatch(e.to_string()))?;

        let mut rng = rand::rng();
        let date = today_short_pt();
        ideas
            .into_iter()
            .map(|idea| {
                let category = Category::from_label(&idea.category).ok_or_else(|| {
                    SiteError::SchemaMismatch(format!("category fora do conjunto: {}", idea.category))
                })?;
                Ok(Article {
                    image_url: animated_cover_url(&idea.id),
                    id: idea.id,
                    title: idea.title,
                    excerpt: idea.excerpt,
                    author: idea.author,
                    date: date.clone(),
                    read_time: idea.read_time,
                    category,
                    tags: idea.tags,
                    is_premium: rng.random_bool(0.40),
                    content: None,
                })
            })
            .collect()
    }
}

/// Shape check past deserialization: the caller must reject, not partially
/// render, a body with empty required pieces.
pub fn validate_content(content: &ArticleContent) -> SiteResult<()> {
    if content.intro.trim().is_empty() {
        return Err(SiteError::SchemaMismatch("intro vazia".to_string()));
    }
    if content.sections.is_empty() {
        return Err(SiteError::SchemaMismatch("nenhuma seção".to_string()));
    }
    for (idx, section) in content.sections.iter().enumerate() {
        if section.heading.trim().is_empty() || section.body.trim().is_empty() {
            return Err(SiteError::SchemaMismatch(format!("seção {} incompleta", idx)));
        }
    }
    if content.conclusion.trim().is_empty() {
        return Err(SiteError::SchemaMismatch("conclusão vazia".to_string()));
    }
    Ok(())
}
