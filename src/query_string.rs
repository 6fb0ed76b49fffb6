use std::collections::HashMap;

use crate::article::Category;

/// Query parameters the feed understands: `?categoria=<label>&page=N`.
#[derive(PartialEq, Debug)]
pub struct QueryString {
    items: HashMap<String, String>,
}

impl QueryString {
    pub fn from(buf: &str) -> Self {
        let vs: Vec<(String, String)> = serde_urlencoded::from_str(buf).unwrap_or_else(|_| vec![]);
        let items: HashMap<String, String> = vs.into_iter().collect();

        QueryString { items }
    }

    pub fn get_page(&self) -> u32 {
        let val = match self.items.get("page") {
            Some(val) => val,
            None => return 1,
        };
        match val.parse::<u32>() {
            Ok(0) | Err(_) => 1,
            Ok(x) => x,
        }
    }

    /// Active category filter. Out-of-set labels behave as "no filter".
    pub fn get_category(&self) -> Option<Category> {
        self.items
            .get("categoria")
            .and_then(|label| Category::from_label(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults_and_clamps() {
        assert_eq!(QueryString::from("").get_page(), 1);
        assert_eq!(QueryString::from("page=3").get_page(), 3);
        assert_eq!(QueryString::from("page=0").get_page(), 1);
        assert_eq!(QueryString::from("page=abc").get_page(), 1);
    }

    #[test]
    fn test_category_from_encoded_label() {
        let qs = QueryString::from("categoria=M%C3%A9todos%20R%C3%A1pidos");
        assert_eq!(qs.get_category(), Some(Category::MetodosRapidos));

        let qs = QueryString::from("categoria=Estudos+de+Caso&page=2");
        assert_eq!(qs.get_category(), Some(Category::EstudosDeCaso));
        assert_eq!(qs.get_page(), 2);

        assert_eq!(QueryString::from("categoria=Inexistente").get_category(), None);
        assert_eq!(QueryString::from("").get_category(), None);
    }
}
