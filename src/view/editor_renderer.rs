use ramhorns::Template;

use crate::article::Category;
use crate::editor::ArticleDraft;
use crate::error::SiteResult;
use crate::view::compile;

#[derive(ramhorns::Content)]
struct EditorPage<'a> {
    site_title: &'a str,
    editing: bool,
    id: &'a str,
    title: &'a str,
    excerpt: &'a str,
    author: &'a str,
    date: &'a str,
    read_time: &'a str,
    image_url: &'a str,
    premium: bool,
    tags_joined: String,
    categories: Vec<CategoryOption>,
    intro: &'a str,
    sections: Vec<SectionField<'a>>,
    conclusion: &'a str,
    problems: Vec<Problem<'a>>,
}

#[derive(ramhorns::Content)]
struct CategoryOption {
    label: &'static str,
    selected: bool,
}

#[derive(ramhorns::Content)]
struct SectionField<'a> {
    index: usize,
    heading: &'a str,
    body: &'a str,
    locked_when_premium: bool,
}

#[derive(ramhorns::Content)]
struct Problem<'a> {
    message: &'a str,
}

pub struct EditorRenderer {
    template: Template<'static>,
}

impl EditorRenderer {
    pub fn new(tpl_src: &str) -> SiteResult<EditorRenderer> {
        Ok(EditorRenderer {
            template: compile(tpl_src, "editor")?,
        })
    }

    /// Renders the editor form for a draft, with the validation problems of
    /// a rejected submission, if any. `editing` switches the heading between
    /// "Editar Matéria" and "Nova Matéria".
    pub fn render(
        &self,
        site_title: &str,
        draft: &ArticleDraft,
        editing: bool,
        problems: &[String],
    ) -> String {
        let sections = draft
            .content
            .sections
            .iter()
            .enumerate()
            .map(|(index, section)| SectionField {
                index,
                heading: section.heading.as_str(),
                body: section.body.as_str(),
                locked_when_premium: index > 0 && draft.is_premium,
            })
            .collect();

        self.template.render(&EditorPage {
            site_title,
            editing,
            id: draft.id.as_str(),
            title: draft.title.as_str(),
            excerpt: draft.excerpt.as_str(),
            author: draft.author.as_str(),
            date: draft.date.as_str(),
            read_time: draft.read_time.as_str(),
            image_url: draft.image_url.as_str(),
            premium: draft.is_premium,
            tags_joined: draft.tags.join(", "),
            categories: Category::ALL
                .iter()
                .map(|cat| CategoryOption {
                    label: cat.label(),
                    selected: *cat == draft.category,
                })
                .collect(),
            intro: draft.content.intro.as_str(),
            sections,
            conclusion: draft.content.conclusion.as_str(),
            problems: problems.iter().map(|m| Problem { message: m }).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::DraftCommand;

    const TPL: &str = "\
{{#editing}}EDITAR{{/editing}}{{^editing}}NOVA{{/editing}}
TAGS=[{{tags_joined}}]
{{#categories}}{{#selected}}CAT=[{{label}}]{{/selected}}{{/categories}}
{{#sections}}S{{index}}{{#locked_when_premium}}(PAYWALL){{/locked_when_premium}}
{{/sections}}{{#problems}}PROBLEMA=[{{message}}]{{/problems}}";

    #[test]
    fn new_draft_renders_defaults() {
        let renderer = EditorRenderer::new(TPL).unwrap();
        let draft = ArticleDraft::new();
        let out = renderer.render("ConstruAcademy", &draft, false, &[]);

        assert!(out.contains("NOVA"));
        assert!(out.contains("CAT=[Métodos Rápidos]"));
        assert!(out.contains("TAGS=[]"));
    }

    #[test]
    fn premium_draft_marks_later_sections_as_paywalled() {
        let renderer = EditorRenderer::new(TPL).unwrap();
        let mut draft = ArticleDraft::new();
        draft.apply(DraftCommand::SetPremium(true)).unwrap();
        draft.apply(DraftCommand::AddSection).unwrap();
        draft.apply(DraftCommand::AddSection).unwrap();

        let out = renderer.render("ConstruAcademy", &draft, true, &[]);
        assert!(out.contains("EDITAR"));
        assert!(!out.contains("S0(PAYWALL)"));
        assert!(out.contains("S1(PAYWALL)"));
    }

    #[test]
    fn validation_problems_show_up_in_the_form() {
        let renderer = EditorRenderer::new(TPL).unwrap();
        let draft = ArticleDraft::new();
        let problems = vec!["O título é obrigatório.".to_string()];
        let out = renderer.render("ConstruAcademy", &draft, false, &problems);
        assert!(out.contains("PROBLEMA=[O título é obrigatório.]"));
    }
}
