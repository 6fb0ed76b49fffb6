use ramhorns::Template;

use crate::error::SiteResult;
use crate::view::compile;

#[derive(ramhorns::Content)]
struct LoginPage<'a> {
    site_title: &'a str,
    has_error: bool,
    error: &'a str,
}

pub struct LoginRenderer {
    template: Template<'static>,
}

impl LoginRenderer {
    pub fn new(tpl_src: &str) -> SiteResult<LoginRenderer> {
        Ok(LoginRenderer {
            template: compile(tpl_src, "login")?,
        })
    }

    pub fn render(&self, site_title: &str, error: Option<&str>) -> String {
        self.template.render(&LoginPage {
            site_title,
            has_error: error.is_some(),
            error: error.unwrap_or(""),
        })
    }
}
