/// Read access to the card structure of a catalog page
///
/// Implementations locate nodes by whatever means their parser offers;
/// [`extract_blocks`](super::extract_blocks) only walks the results.
pub trait CardMarkup {
    /// Handle to one element of the page
    type Node<'a>: Copy
    where
        Self: 'a;

    /// Every card container on the page, in document order
    fn find_card_blocks<'a>(&'a self) -> Vec<Self::Node<'a>>;

    /// Text of the first title node under `node`, if any
    fn find_title<'a>(&'a self, node: Self::Node<'a>) -> Option<String>;

    /// Text of every description node under `node`, in document order
    fn find_descriptions<'a>(&'a self, node: Self::Node<'a>) -> Vec<String>;

    /// Sub-listing containers under `node`, excluding `node` itself
    fn find_nested_blocks<'a>(&'a self, node: Self::Node<'a>) -> Vec<Self::Node<'a>>;

    /// Raw `href` of the first link under `node`
    fn find_link<'a>(&'a self, node: Self::Node<'a>) -> Option<String>;
}
