use ramhorns::Template;

use crate::article::{Article, Category};
use crate::error::SiteResult;
use crate::pager::Pager;
use crate::view::compile;

#[derive(ramhorns::Content)]
struct FeedPage<'a> {
    site_title: &'a str,
    admin_mode: bool,
    has_filter: bool,
    filter_label: String,
    categories: Vec<CategoryLink>,
    hero: Vec<HeroItem>,
    cards: Vec<CardItem>,
    empty: bool,
    page_list: Vec<PageLink>,
    show_pagination: bool,
}

#[derive(ramhorns::Content)]
struct CategoryLink {
    label: String,
    link: String,
    active: bool,
}

#[derive(ramhorns::Content)]
struct HeroItem {
    link: String,
    title: String,
    excerpt: String,
    date: String,
    image_url: String,
    premium: bool,
}

#[derive(ramhorns::Content)]
struct CardItem {
    link: String,
    title: String,
    excerpt: String,
    author: String,
    date: String,
    read_time: String,
    category: String,
    image_url: String,
    premium: bool,
    tags: Vec<TagItem>,
}

#[derive(ramhorns::Content)]
struct TagItem {
    tag: String,
}

#[derive(ramhorns::Content)]
struct PageLink {
    number: u32,
    link: String,
    current: bool,
}

fn card(article: &Article) -> CardItem {
    CardItem {
        link: format!("/view/{}/", article.id),
        title: article.title.clone(),
        excerpt: article.excerpt.clone(),
        author: article.author.clone(),
        date: article.date.clone(),
        read_time: article.read_time.clone(),
        category: article.category.label().to_string(),
        image_url: article.image_url.clone(),
        premium: article.is_premium,
        tags: article.tags.iter().map(|t| TagItem { tag: t.clone() }).collect(),
    }
}

fn feed_link(category: Option<Category>, page: Option<u32>) -> String {
    let mut pairs: Vec<(&str, String)> = vec![];
    if let Some(cat) = category {
        pairs.push(("categoria", cat.label().to_string()));
    }
    if let Some(page) = page {
        pairs.push(("page", page.to_string()));
    }
    if pairs.is_empty() {
        return "/".to_string();
    }
    let query = serde_urlencoded::to_string(&pairs).unwrap_or_default();
    format!("/?{}", query)
}

pub struct FeedRenderer {
    template: Template<'static>,
    page_size: u32,
}

impl FeedRenderer {
    pub fn new(tpl_src: &str, page_size: u32) -> SiteResult<FeedRenderer> {
        Ok(FeedRenderer {
            template: compile(tpl_src, "feed")?,
            page_size,
        })
    }

    /// Renders the home feed from the full article list. The first article
    /// owns the hero slot; it is shown unfiltered or when it matches the
    /// active filter. Unfiltered, the grid starts at the second article so
    /// the hero does not repeat; filtered, the grid keeps every match.
    pub fn render(
        &self,
        site_title: &str,
        articles: &[Article],
        filter: Option<Category>,
        requested_page: u32,
        admin_mode: bool,
    ) -> String {
        let hero_article = articles
            .first()
            .filter(|a| filter.is_none() || filter == Some(a.category));

        let grid: Vec<&Article> = match filter {
            None => articles.iter().skip(1).collect(),
            Some(cat) => articles.iter().filter(|a| a.category == cat).collect(),
        };

        let pager = Pager::new(&grid, self.page_size);
        let (current_page, window) = pager.page(requested_page);

        let page_list = (1..=pager.page_count())
            .map(|number| PageLink {
                number,
                link: feed_link(filter, Some(number)),
                current: number == current_page,
            })
            .collect::<Vec<_>>();

        let mut categories: Vec<CategoryLink> = vec![CategoryLink {
            label: "Início".to_string(),
            link: "/".to_string(),
            active: filter.is_none(),
        }];
        categories.extend(Category::ALL.iter().map(|cat| CategoryLink {
            label: cat.label().to_string(),
            link: feed_link(Some(*cat), None),
            active: filter == Some(*cat),
        }));

        self.template.render(&FeedPage {
            site_title,
            admin_mode,
            has_filter: filter.is_some(),
            filter_label: filter.map(|c| c.label().to_string()).unwrap_or_default(),
            categories,
            hero: hero_article
                .map(|a| HeroItem {
                    link: format!("/view/{}/", a.id),
                    title: a.title.clone(),
                    excerpt: a.excerpt.clone(),
                    date: a.date.clone(),
                    image_url: a.image_url.clone(),
                    premium: a.is_premium,
                })
                .into_iter()
                .collect(),
            cards: window.iter().map(|a| card(a)).collect(),
            empty: match filter {
                None => articles.is_empty(),
                Some(_) => grid.is_empty(),
            },
            show_pagination: pager.page_count() > 1,
            page_list,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::initial_feed;

    const TPL: &str = "\
{{#hero}}HERO=[{{title}}]{{/hero}}
{{#cards}}CARD=[{{title}}]
{{/cards}}{{#empty}}VAZIO{{/empty}}";

    #[test]
    fn unfiltered_feed_promotes_the_first_article() {
        let feed = initial_feed();
        let renderer = FeedRenderer::new(TPL, 20).unwrap();
        let out = renderer.render("ConstruAcademy", &feed, None, 1, false);

        assert!(out.contains(&format!("HERO=[{}]", feed[0].title)));
        assert!(
            !out.contains(&format!("CARD=[{}]", feed[0].title)),
            "hero must not repeat in the grid"
        );
        assert!(out.contains(&format!("CARD=[{}]", feed[1].title)));
    }

    #[test]
    fn filtered_feed_keeps_every_match_in_the_grid() {
        let feed = initial_feed();
        let filter = Category::MetodosRapidos;
        assert_eq!(feed[0].category, filter, "first seed article anchors this test");

        let renderer = FeedRenderer::new(TPL, 20).unwrap();
        let out = renderer.render("ConstruAcademy", &feed, Some(filter), 1, false);

        // The hero matches the filter, and the grid still lists it.
        assert!(out.contains(&format!("HERO=[{}]", feed[0].title)));
        for article in feed.iter().filter(|a| a.category == filter) {
            assert!(out.contains(&format!("CARD=[{}]", article.title)));
        }
        for article in feed.iter().filter(|a| a.category != filter) {
            assert!(!out.contains(&format!("CARD=[{}]", article.title)));
        }
    }

    #[test]
    fn hero_is_hidden_when_it_misses_the_filter() {
        let feed = initial_feed();
        let filter = Category::Contingencia;
        assert_ne!(feed[0].category, filter);

        let renderer = FeedRenderer::new(TPL, 20).unwrap();
        let out = renderer.render("ConstruAcademy", &feed, Some(filter), 1, false);
        assert!(!out.contains("HERO=["));
        assert!(out.contains("CARD=["));
    }

    #[test]
    fn empty_store_renders_the_empty_state() {
        let renderer = FeedRenderer::new(TPL, 20).unwrap();
        let out = renderer.render("ConstruAcademy", &[], None, 1, false);
        assert!(out.contains("VAZIO"));
        assert!(!out.contains("HERO=["));
    }

    #[test]
    fn feed_links_encode_category_labels() {
        assert_eq!(feed_link(None, None), "/");
        let link = feed_link(Some(Category::MetodosRapidos), Some(2));
        assert!(link.starts_with("/?categoria="));
        assert!(link.contains("page=2"));
        assert!(!link.contains(' '));
    }
}
