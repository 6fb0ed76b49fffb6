use crate::article::{ArticleContent, Section};

/// Character budget for the blurred teaser synthesized from the first locked
/// section.
pub const TEASER_BUDGET: usize = 300;

/// External checkout page the paywall call-to-action links to. No parameters
/// are passed and no confirmation comes back.
pub const CHECKOUT_URL: &str = "https://pay.kiwify.com.br/dM6Isu0";

const TEASER_FALLBACK_HEADING: &str = "Implementação Operacional";
const TEASER_FALLBACK_BODY: &str = "Lorem ipsum dolor sit amet...";

/// What the reader gets past the hook: everything, or an obfuscated teaser
/// under the checkout call-to-action.
#[derive(Debug, PartialEq)]
pub enum Gated<'a> {
    Full {
        sections: &'a [Section],
        conclusion: &'a str,
    },
    Teaser {
        heading: &'a str,
        body: String,
    },
}

/// Render plan for one article body. The intro and the opening section are
/// the hook and stay visible regardless of the premium flag.
#[derive(Debug, PartialEq)]
pub struct RenderPlan<'a> {
    pub intro: &'a str,
    pub opening: Option<&'a Section>,
    pub rest: Gated<'a>,
}

/// Pure gate decision. Rendering only: the full body stays in memory and in
/// the persisted state whatever the flag says.
pub fn plan(content: &ArticleContent, is_premium: bool) -> RenderPlan<'_> {
    let rest = if is_premium {
        match content.sections.get(1) {
            Some(locked) => Gated::Teaser {
                heading: locked.heading.as_str(),
                body: teaser_body(&locked.body),
            },
            None => Gated::Teaser {
                heading: TEASER_FALLBACK_HEADING,
                body: TEASER_FALLBACK_BODY.to_string(),
            },
        }
    } else {
        Gated::Full {
            sections: if content.sections.len() > 1 {
                &content.sections[1..]
            } else {
                &[]
            },
            conclusion: content.conclusion.as_str(),
        }
    };

    RenderPlan {
        intro: content.intro.as_str(),
        opening: content.sections.first(),
        rest,
    }
}

fn teaser_body(body: &str) -> String {
    let mut teaser: String = body.chars().take(TEASER_BUDGET).collect();
    teaser.push_str("...");
    teaser
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(section_bodies: &[&str]) -> ArticleContent {
        ArticleContent {
            intro: "gancho".to_string(),
            sections: section_bodies
                .iter()
                .enumerate()
                .map(|(i, body)| Section {
                    heading: format!("Seção {}", i + 1),
                    body: body.to_string(),
                })
                .collect(),
            conclusion: "veredito".to_string(),
        }
    }

    #[test]
    fn free_articles_render_everything_in_full() {
        let content = content(&["estratégia", "operacional", "números"]);
        let plan = plan(&content, false);

        assert_eq!(plan.intro, "gancho");
        assert_eq!(plan.opening.unwrap().body, "estratégia");
        match plan.rest {
            Gated::Full { sections, conclusion } => {
                assert_eq!(sections.len(), 2);
                assert_eq!(sections[0].body, "operacional");
                assert_eq!(conclusion, "veredito");
            }
            Gated::Teaser { .. } => panic!("free article must not be gated"),
        }
    }

    #[test]
    fn premium_teaser_is_exactly_the_budget_plus_ellipsis() {
        let long_body: String = "x".repeat(500);
        let content = content(&["estratégia", &long_body]);
        let plan = plan(&content, true);

        match plan.rest {
            Gated::Teaser { heading, body } => {
                assert_eq!(heading, "Seção 2");
                assert_eq!(body.chars().count(), TEASER_BUDGET + 3);
                assert_eq!(body, format!("{}...", "x".repeat(300)));
            }
            Gated::Full { .. } => panic!("premium article must be gated"),
        }
    }

    #[test]
    fn teaser_budget_counts_characters_not_bytes() {
        let accented: String = "ã".repeat(400);
        let content = content(&["abre", &accented]);
        let plan = plan(&content, true);

        match plan.rest {
            Gated::Teaser { body, .. } => {
                assert_eq!(body.chars().count(), TEASER_BUDGET + 3);
                assert!(body.starts_with("ããã"));
            }
            Gated::Full { .. } => panic!("premium article must be gated"),
        }
    }

    #[test]
    fn premium_never_exposes_locked_text_in_full() {
        let content = content(&["livre", "segredo premium", "mais segredo"]);
        let plan = plan(&content, true);

        assert_eq!(plan.opening.unwrap().body, "livre");
        match plan.rest {
            Gated::Teaser { body, .. } => {
                // Short locked bodies still get the ellipsis marker.
                assert_eq!(body, "segredo premium...");
            }
            Gated::Full { .. } => panic!("conclusion and later sections must stay gated"),
        }
    }

    #[test]
    fn missing_second_section_falls_back_to_placeholders() {
        let content = content(&["só a estratégia"]);
        let plan = plan(&content, true);

        match plan.rest {
            Gated::Teaser { heading, body } => {
                assert_eq!(heading, "Implementação Operacional");
                assert_eq!(body, "Lorem ipsum dolor sit amet...");
            }
            Gated::Full { .. } => panic!("premium article must be gated"),
        }
    }

    #[test]
    fn empty_section_list_still_produces_a_plan() {
        let content = content(&[]);
        let plan = plan(&content, true);
        assert!(plan.opening.is_none());
        assert!(matches!(plan.rest, Gated::Teaser { .. }));

        let free = super::plan(&content, false);
        match free.rest {
            Gated::Full { sections, .. } => assert!(sections.is_empty()),
            Gated::Teaser { .. } => panic!(),
        }
    }
}
