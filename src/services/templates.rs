use axum::response::Html;
use minijinja::Environment;
use serde::Serialize;

use super::response::ServiceError;
use crate::domain::conversation::schemas::path_segment;

/// HTML pages compiled into the binary. `.html` templates are auto-escaped.
pub struct Templates {
	env: Environment<'static>,
}

impl Templates {
	pub fn new() -> Result<Self, minijinja::Error> {
		let mut env = Environment::new();
		env.add_filter("path_segment", |raw: &str| path_segment(raw));
		env.add_template("layout.html", include_str!("../../templates/layout.html"))?;
		env.add_template("index.html", include_str!("../../templates/index.html"))?;
		env.add_template("conversation_list.html", include_str!("../../templates/conversation_list.html"))?;
		env.add_template("conversation.html", include_str!("../../templates/conversation.html"))?;
		env.add_template("messages.html", include_str!("../../templates/messages.html"))?;
		Ok(Self { env })
	}

	pub fn render<S: Serialize>(
		&self,
		name: &str,
		context: S,
	) -> Result<Html<String>, ServiceError> {
		let page = self.env.get_template(name)?.render(context)?;
		Ok(Html(page))
	}
}
