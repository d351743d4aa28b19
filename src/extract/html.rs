//! [`CardMarkup`] over a `scraper` document

use super::CardMarkup;
use crate::config::SelectorConfig;
use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};

/// Compiled selectors for one catalog layout
#[derive(Debug, Clone)]
pub struct CardSelectors {
    card: Selector,
    title: Selector,
    description: Selector,
    nested: Selector,
    link: Selector,
}

impl CardSelectors {
    /// Compiles the configured selectors
    ///
    /// # Returns
    ///
    /// * `Ok(CardSelectors)` - Every selector parsed
    /// * `Err(ConfigError::InvalidSelector)` - The first selector that failed
    pub fn from_config(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            card: compile(&config.card)?,
            title: compile(&config.title)?,
            description: compile(&config.description)?,
            nested: compile(&config.nested)?,
            link: compile(&config.link)?,
        })
    }
}

fn compile(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// A parsed catalog page
pub struct HtmlCards<'s> {
    document: Html,
    selectors: &'s CardSelectors,
}

impl<'s> HtmlCards<'s> {
    /// Parses a full HTML document
    pub fn parse(html: &str, selectors: &'s CardSelectors) -> Self {
        Self {
            document: Html::parse_document(html),
            selectors,
        }
    }

    /// The underlying document, for link discovery
    pub fn document(&self) -> &Html {
        &self.document
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

impl CardMarkup for HtmlCards<'_> {
    type Node<'a> = ElementRef<'a> where Self: 'a;

    fn find_card_blocks<'a>(&'a self) -> Vec<ElementRef<'a>> {
        self.document.select(&self.selectors.card).collect()
    }

    fn find_title<'a>(&'a self, node: ElementRef<'a>) -> Option<String> {
        node.select(&self.selectors.title).next().map(element_text)
    }

    fn find_descriptions<'a>(&'a self, node: ElementRef<'a>) -> Vec<String> {
        node.select(&self.selectors.description)
            .map(element_text)
            .collect()
    }

    fn find_nested_blocks<'a>(&'a self, node: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        // A card is usually a div itself; never report it as its own sub-listing
        node.select(&self.selectors.nested)
            .filter(|candidate| *candidate != node)
            .collect()
    }

    fn find_link<'a>(&'a self, node: ElementRef<'a>) -> Option<String> {
        node.select(&self.selectors.link)
            .find_map(|anchor| anchor.value().attr("href"))
            .map(|href| href.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selectors() -> CardSelectors {
        CardSelectors::from_config(&SelectorConfig::default()).unwrap()
    }

    #[test]
    fn test_invalid_selector_rejected() {
        let config = SelectorConfig {
            card: "div..card-body".to_string(),
            ..SelectorConfig::default()
        };
        assert!(matches!(
            CardSelectors::from_config(&config),
            Err(ConfigError::InvalidSelector { .. })
        ));
    }

    #[test]
    fn test_title_is_first_match() {
        let selectors = selectors();
        let page = HtmlCards::parse(
            r#"<div class="card-body">
                <b class="card-title">One</b><b class="card-title">Two</b>
            </div>"#,
            &selectors,
        );
        let cards = page.find_card_blocks();
        assert_eq!(page.find_title(cards[0]), Some("One".to_string()));
    }

    #[test]
    fn test_title_requires_class() {
        let selectors = selectors();
        let page = HtmlCards::parse(
            r#"<div class="card-body"><b>Plain bold</b></div>"#,
            &selectors,
        );
        let cards = page.find_card_blocks();
        assert_eq!(page.find_title(cards[0]), None);
    }

    #[test]
    fn test_nested_title_text_flattened() {
        let selectors = selectors();
        let page = HtmlCards::parse(
            r#"<div class="card-body"><b class="card-title">Intro <i>to</i> X</b></div>"#,
            &selectors,
        );
        let cards = page.find_card_blocks();
        assert_eq!(page.find_title(cards[0]), Some("Intro to X".to_string()));
    }

    #[test]
    fn test_nested_blocks_include_deeper_divs() {
        let selectors = selectors();
        let page = HtmlCards::parse(
            r#"<div class="card-body">
                <div><div><b class="card-title">Deep</b></div></div>
            </div>"#,
            &selectors,
        );
        let cards = page.find_card_blocks();
        assert_eq!(page.find_nested_blocks(cards[0]).len(), 2);
    }

    #[test]
    fn test_custom_layout() {
        let config = SelectorConfig {
            card: "article.course".to_string(),
            title: "h3".to_string(),
            description: "p".to_string(),
            nested: "section".to_string(),
            link: "a[href]".to_string(),
        };
        let selectors = CardSelectors::from_config(&config).unwrap();
        let page = HtmlCards::parse(
            r#"<article class="course"><h3>Rust</h3><p>Ownership</p></article>"#,
            &selectors,
        );
        let cards = page.find_card_blocks();
        assert_eq!(cards.len(), 1);
        assert_eq!(page.find_title(cards[0]), Some("Rust".to_string()));
        assert_eq!(page.find_descriptions(cards[0]), vec!["Ownership".to_string()]);
        assert!(page.find_nested_blocks(cards[0]).is_empty());
    }
}
