use ramhorns::Template;

use crate::error::{SiteError, SiteResult};

pub mod article_renderer;
pub mod editor_renderer;
pub mod feed_renderer;
pub mod login_renderer;
pub mod rss_renderer;

/// Article bodies carry markdown-style emphasis and lists; they render to
/// HTML the same way post bodies do on any of our pages.
pub fn body_html(text: &str) -> SiteResult<String> {
    match markdown::to_html_with_options(text, &markdown::Options::gfm()) {
        Ok(html) => Ok(html),
        Err(e) => Err(SiteError::Template(e.reason)),
    }
}

pub(crate) fn compile(tpl_src: &str, name: &str) -> SiteResult<Template<'static>> {
    Template::new(tpl_src.to_string())
        .map_err(|e| SiteError::Template(format!("Error parsing {} template: {}", name, e)))
}

#[derive(ramhorns::Content)]
struct ErrorPage<'a> {
    site_title: &'a str,
    message: &'a str,
}

/// Blocking-alert analogue: a full page with the localized failure message
/// and a way back to the feed.
pub struct ErrorRenderer {
    template: Template<'static>,
}

impl ErrorRenderer {
    pub fn new(tpl_src: &str) -> SiteResult<ErrorRenderer> {
        Ok(ErrorRenderer {
            template: compile(tpl_src, "error")?,
        })
    }

    pub fn render(&self, site_title: &str, message: &str) -> String {
        self.template.render(&ErrorPage {
            site_title,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_html_renders_emphasis_and_lists() {
        let html = body_html("A dor é **real**.\n\n- item um\n- item dois").unwrap();
        assert!(html.contains("<strong>real</strong>"));
        assert!(html.contains("<li>"));
    }

    #[test]
    fn error_renderer_injects_the_message() {
        let renderer = ErrorRenderer::new("[{{site_title}}] {{message}}").unwrap();
        let page = renderer.render("ConstruAcademy", "Falha ao carregar artigo. Tente novamente.");
        assert_eq!(page, "[ConstruAcademy] Falha ao carregar artigo. Tente novamente.");
    }
}
