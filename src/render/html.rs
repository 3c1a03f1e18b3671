//! HTML inline markup (`<b>bold</b>`), the form pdoc pages embed directly.

use crate::render::Renderer;

pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn strong(&self, text: &str) -> String {
        format!("<b>{text}</b>")
    }

    fn type_annotation(&self, ty: &str) -> String {
        format!("(<b></i>{ty}</i></b>)")
    }
}
