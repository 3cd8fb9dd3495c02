use std::sync::Arc;
use tera::Tera;

/// Shared tera instance for the server-rendered pages. Templates are loaded
/// once at startup; there is no hot reload.
#[derive(Clone)]
pub struct TemplateEngine {
  tera: Arc<Tera>,
}

impl TemplateEngine {
  pub fn new() -> Result<Self, tera::Error> {
    Self::with_glob("templates/**/*.html.tera")
  }

  pub fn with_glob(glob: &str) -> Result<Self, tera::Error> {
    let mut tera = Tera::new(glob)?;
    tera.autoescape_on(vec![".html.tera"]);

    tracing::debug!(
      template_count = tera.get_template_names().count(),
      "Templates loaded"
    );

    Ok(Self {
      tera: Arc::new(tera),
    })
  }

  pub fn render(&self, template: &str, context: &tera::Context) -> Result<String, tera::Error> {
    self.tera.render(template, context)
  }
}
