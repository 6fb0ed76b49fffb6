use ramhorns::Template;

use crate::article::Article;
use crate::error::SiteResult;
use crate::paywall::{self, Gated};
use crate::view::{body_html, compile};

#[derive(ramhorns::Content)]
struct ArticlePage<'a> {
    site_title: &'a str,
    admin_mode: bool,
    id: &'a str,
    title: &'a str,
    category: &'a str,
    author: &'a str,
    date: &'a str,
    read_time: &'a str,
    image_url: &'a str,
    premium: bool,
    tags: Vec<TagItem<'a>>,
    intro_html: String,
    opening: Vec<OpeningSection>,
    locked: bool,
    teaser_heading: String,
    teaser_text: String,
    checkout_url: &'static str,
    free_sections: Vec<FreeSection>,
    conclusion_html: String,
}

#[derive(ramhorns::Content)]
struct TagItem<'a> {
    tag: &'a str,
}

#[derive(ramhorns::Content)]
struct OpeningSection {
    heading: String,
    body_html: String,
}

#[derive(ramhorns::Content)]
struct FreeSection {
    number: String,
    heading: String,
    body_html: String,
}

pub struct ArticleRenderer {
    template: Template<'static>,
}

impl ArticleRenderer {
    pub fn new(tpl_src: &str) -> SiteResult<ArticleRenderer> {
        Ok(ArticleRenderer {
            template: compile(tpl_src, "article")?,
        })
    }

    /// Renders the detail page for an article whose body is present. The
    /// paywall plan decides what goes out in full; the teaser text is kept
    /// as plain text, the template obfuscates it.
    pub fn render(&self, site_title: &str, article: &Article, admin_mode: bool) -> SiteResult<String> {
        let content = article
            .content
            .as_ref()
            .expect("detail rendering requires a filled body");
        let plan = paywall::plan(content, article.is_premium);

        let opening = match plan.opening {
            Some(section) => vec![OpeningSection {
                heading: section.heading.clone(),
                body_html: body_html(&section.body)?,
            }],
            None => vec![],
        };

        let (locked, teaser_heading, teaser_text, free_sections, conclusion_html) = match plan.rest {
            Gated::Teaser { heading, body } => {
                (true, heading.to_string(), body, vec![], String::new())
            }
            Gated::Full {
                sections,
                conclusion,
            } => {
                let mut rendered = Vec::with_capacity(sections.len());
                for (idx, section) in sections.iter().enumerate() {
                    rendered.push(FreeSection {
                        number: format!("{:02}", idx + 2),
                        heading: section.heading.clone(),
                        body_html: body_html(&section.body)?,
                    });
                }
                (false, String::new(), String::new(), rendered, body_html(conclusion)?)
            }
        };

        Ok(self.template.render(&ArticlePage {
            site_title,
            admin_mode,
            id: article.id.as_str(),
            title: article.title.as_str(),
            category: article.category.label(),
            author: article.author.as_str(),
            date: article.date.as_str(),
            read_time: article.read_time.as_str(),
            image_url: article.image_url.as_str(),
            premium: article.is_premium,
            tags: article
                .tags
                .iter()
                .take(2)
                .map(|t| TagItem { tag: t.as_str() })
                .collect(),
            intro_html: body_html(plan.intro)?,
            opening,
            locked,
            teaser_heading,
            teaser_text,
            checkout_url: paywall::CHECKOUT_URL,
            free_sections,
            conclusion_html,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::initial_feed;

    const TPL: &str = "\
TITLE=[{{title}}]
INTRO=[{{{intro_html}}}]
{{#opening}}OPEN=[{{heading}}]{{/opening}}
{{#locked}}TEASER=[{{teaser_text}}]CHECKOUT=[{{checkout_url}}]{{/locked}}
{{^locked}}{{#free_sections}}SEC{{number}}=[{{heading}}]
{{/free_sections}}FIM=[{{{conclusion_html}}}]{{/locked}}";

    #[test]
    fn premium_article_renders_the_teaser_not_the_body() {
        let feed = initial_feed();
        let article = &feed[0];
        assert!(article.is_premium);

        let renderer = ArticleRenderer::new(TPL).unwrap();
        let page = renderer.render("ConstruAcademy", article, false).unwrap();

        let locked = &article.content.as_ref().unwrap().sections[1];
        assert!(page.contains("TEASER=["));
        assert!(page.contains("CHECKOUT=[https://pay.kiwify.com.br/dM6Isu0]"));
        assert!(
            !page.contains(&locked.body),
            "full locked body must never reach the page"
        );
        assert!(!page.contains("FIM=["));
    }

    #[test]
    fn free_article_renders_every_section_and_the_conclusion() {
        let feed = initial_feed();
        let mut article = feed[0].clone();
        article.is_premium = false;

        let renderer = ArticleRenderer::new(TPL).unwrap();
        let page = renderer.render("ConstruAcademy", &article, false).unwrap();

        assert!(page.contains("SEC02=["));
        assert!(page.contains("SEC03=["));
        assert!(page.contains("FIM=["));
        assert!(!page.contains("TEASER=["));
    }

    #[test]
    fn section_numbers_start_at_the_second_slot() {
        let feed = initial_feed();
        let mut article = feed[0].clone();
        article.is_premium = false;

        let renderer = ArticleRenderer::new(TPL).unwrap();
        let page = renderer.render("ConstruAcademy", &article, false).unwrap();
        let second = &article.content.as_ref().unwrap().sections[1].heading;
        assert!(page.contains(&format!("SEC02=[{}]", second)));
    }
}
