use minijinja::{context, Environment};

use crate::error::Result;
use crate::models::Item;

const ITEM_FORM: &str = "item-form.html";
const ITEM_VIEW: &str = "item-view.html";

/// HTML templates, embedded at compile time
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(ITEM_FORM, include_str!("../templates/item-form.html"))?;
        env.add_template(ITEM_VIEW, include_str!("../templates/item-view.html"))?;
        Ok(Self { env })
    }

    pub fn item_form(&self) -> Result<String> {
        Ok(self.env.get_template(ITEM_FORM)?.render(context! {})?)
    }

    pub fn item_view(&self, item: &Item) -> Result<String> {
        Ok(self.env.get_template(ITEM_VIEW)?.render(context! { item => item })?)
    }
}
