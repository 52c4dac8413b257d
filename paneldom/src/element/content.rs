#[derive(Debug, Clone, Default)]
pub enum Content {
    #[default]
    None,
    Text(String),
    Children(Vec<super::Element>),
    /// Children stacked at the same origin; later layers draw on top.
    Layers(Vec<super::Element>),
}

impl Content {
    /// Child elements for both flow children and layers.
    pub fn children(&self) -> &[super::Element] {
        match self {
            Content::Children(children) | Content::Layers(children) => children,
            Content::None | Content::Text(_) => &[],
        }
    }
}
