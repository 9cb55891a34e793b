//! In-memory page document: the list area, the selection control, the signup
//! form and the status banner, addressed by the element ids the page exposes.
//!
//! Text and attribute values are written into markup verbatim. Backend data is
//! trusted; nothing here escapes it.

use shared::domain::{Activity, MessageKind};

pub const ACTIVITIES_LIST_ID: &str = "activities-list";
pub const ACTIVITY_SELECT_ID: &str = "activity";
pub const SIGNUP_FORM_ID: &str = "signup-form";
pub const EMAIL_INPUT_ID: &str = "email";
pub const MESSAGE_ID: &str = "message";

pub const HIDDEN_CLASS: &str = "hidden";
pub const LOADING_NOTICE: &str = "Loading activities...";

const VOID_TAGS: &[&str] = &["input", "br", "hr", "img", "meta", "link"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    dataset: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
            attributes: Vec::new(),
            dataset: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Adds a `data-{key}` attribute.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.dataset.push((key.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children
            .extend(children.into_iter().map(Node::Element));
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn data(&self, key: &str) -> Option<&str> {
        self.dataset
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Drops every child and installs `children` in their place.
    pub fn replace_children(&mut self, children: impl IntoIterator<Item = Element>) {
        self.children = children.into_iter().map(Node::Element).collect();
    }

    /// Pre-order walk over this element and all element descendants.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = vec![self];
        for child in self.child_elements() {
            out.extend(child.descendants());
        }
        out
    }

    pub fn find_all(&self, predicate: impl Fn(&Element) -> bool) -> Vec<&Element> {
        self.descendants()
            .into_iter()
            .filter(|element| predicate(element))
            .collect()
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => out.push_str(&element.text_content()),
            }
        }
        out
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push_str(&format!("<{}", self.tag));
        if let Some(id) = &self.id {
            out.push_str(&format!(" id=\"{id}\""));
        }
        if !self.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", self.classes.join(" ")));
        }
        for (key, value) in &self.dataset {
            out.push_str(&format!(" data-{key}=\"{value}\""));
        }
        for (name, value) in &self.attributes {
            out.push_str(&format!(" {name}=\"{value}\""));
        }
        out.push('>');

        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }

        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.write_html(out),
            }
        }
        out.push_str(&format!("</{}>", self.tag));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupForm {
    pub email: String,
    /// Selected value of the activity control; empty when nothing is selected.
    pub activity: String,
}

impl SignupForm {
    pub fn reset(&mut self) {
        self.email.clear();
        self.activity.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBanner {
    pub text: String,
    pub kind: Option<MessageKind>,
    pub hidden: bool,
}

impl Default for MessageBanner {
    fn default() -> Self {
        Self {
            text: String::new(),
            kind: None,
            hidden: true,
        }
    }
}

impl MessageBanner {
    pub fn is_visible(&self) -> bool {
        !self.hidden
    }

    pub fn class_name(&self) -> String {
        let mut classes = Vec::new();
        if let Some(kind) = self.kind {
            classes.push(kind.css_class());
        }
        if self.hidden {
            classes.push(HIDDEN_CLASS);
        }
        classes.join(" ")
    }

    pub fn to_element(&self) -> Element {
        let mut element = Element::new("div").with_id(MESSAGE_ID);
        if let Some(kind) = self.kind {
            element = element.with_class(kind.css_class());
        }
        if self.hidden {
            element = element.with_class(HIDDEN_CLASS);
        }
        element.with_text(self.text.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSurface {
    activities_list: Element,
    activity_select: Element,
    pub form: SignupForm,
    /// Transient copy of the last successful fetch, discarded on the next one.
    pub activities: Vec<Activity>,
}

impl Default for PageSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl PageSurface {
    pub fn new() -> Self {
        Self {
            activities_list: Element::new("div")
                .with_id(ACTIVITIES_LIST_ID)
                .with_child(Element::new("p").with_text(LOADING_NOTICE)),
            activity_select: Element::new("select")
                .with_id(ACTIVITY_SELECT_ID)
                .with_child(crate::render::placeholder_option()),
            form: SignupForm {
                email: String::new(),
                activity: String::new(),
            },
            activities: Vec::new(),
        }
    }

    pub fn activities_list(&self) -> &Element {
        &self.activities_list
    }

    pub fn activity_select(&self) -> &Element {
        &self.activity_select
    }

    /// Rebuilds the list area and option set; any selection is lost.
    pub fn replace_activities(
        &mut self,
        cards: Vec<Element>,
        options: Vec<Element>,
        activities: Vec<Activity>,
    ) {
        self.activities_list.replace_children(cards);
        self.activity_select.replace_children(options);
        self.form.activity.clear();
        self.activities = activities;
    }

    pub fn show_load_failure(&mut self, notice: Element) {
        self.activities_list.replace_children([notice]);
        self.activity_select
            .replace_children([crate::render::placeholder_option()]);
        self.form.activity.clear();
        self.activities.clear();
    }

    /// Values of the selectable activity options, the placeholder excluded.
    pub fn activity_options(&self) -> Vec<&str> {
        self.activity_select
            .child_elements()
            .filter_map(|option| option.attr("value"))
            .filter(|value| !value.is_empty())
            .collect()
    }

    pub fn remove_controls(&self) -> Vec<&Element> {
        self.activities_list
            .find_all(|element| element.has_class(crate::render::REMOVE_CONTROL_CLASS))
    }

    pub fn find_remove_control(&self, activity: &str, email: &str) -> Option<&Element> {
        self.remove_controls()
            .into_iter()
            .find(|control| {
                control.data("activity") == Some(activity) && control.data("email") == Some(email)
            })
    }

    pub fn to_html(&self, banner: &MessageBanner) -> String {
        let mut select = self.activity_select.clone();
        if !self.form.activity.is_empty() {
            for child in &mut select.children {
                if let Node::Element(option) = child {
                    if option.attr("value") == Some(self.form.activity.as_str()) {
                        option.attributes.push(("selected".into(), "selected".into()));
                    }
                }
            }
        }
        let form = Element::new("form")
            .with_id(SIGNUP_FORM_ID)
            .with_child(
                Element::new("input")
                    .with_id(EMAIL_INPUT_ID)
                    .with_attr("type", "email")
                    .with_attr("value", self.form.email.clone()),
            )
            .with_child(select)
            .with_child(
                Element::new("button")
                    .with_attr("type", "submit")
                    .with_text("Sign Up"),
            );

        let mut out = self.activities_list.to_html();
        out.push('\n');
        out.push_str(&form.to_html());
        out.push('\n');
        out.push_str(&banner.to_element().to_html());
        out
    }
}
