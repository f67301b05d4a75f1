use crate::backend::RenderBackend;
use billard_common::{MeshId, ShaderId, UniformValue};
use serde::Serialize;
use std::convert::Infallible;

/// One call received by a [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    BeginFrame { clear_color: [f32; 4] },
    UseShader { shader: ShaderId },
    SetUniform { name: String, value: UniformValue },
    DrawMesh { mesh: MeshId },
    EndFrame,
}

/// Backend that records every call instead of drawing.
///
/// Used headless by the CLI and by tests that compare frames.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    ops: Vec<DrawOp>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Hand over the recorded calls and start empty.
    pub fn take(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn draw_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::DrawMesh { .. }))
            .count()
    }

    /// Human-readable listing, one call per line.
    pub fn render_text(&self) -> String {
        render_text(&self.ops)
    }
}

/// Listing of recorded calls; frames are numbered from zero.
pub fn render_text(ops: &[DrawOp]) -> String {
    let mut out = String::new();
    let mut frame = 0usize;
    for op in ops {
        match op {
            DrawOp::BeginFrame { clear_color: c } => {
                out.push_str(&format!(
                    "=== frame {frame} clear=({:.2}, {:.2}, {:.2}, {:.2}) ===\n",
                    c[0], c[1], c[2], c[3]
                ));
                frame += 1;
            }
            DrawOp::UseShader { shader } => out.push_str(&format!("use {shader}\n")),
            DrawOp::SetUniform { name, value } => {
                out.push_str(&format!("  {name} = {value}\n"));
            }
            DrawOp::DrawMesh { mesh } => out.push_str(&format!("  draw {mesh}\n")),
            DrawOp::EndFrame => out.push_str("=== end ===\n"),
        }
    }
    out
}

impl RenderBackend for RecordingBackend {
    type Error = Infallible;

    fn begin_frame(&mut self, clear_color: [f32; 4]) -> Result<(), Infallible> {
        self.ops.push(DrawOp::BeginFrame { clear_color });
        Ok(())
    }

    fn use_shader(&mut self, shader: &ShaderId) -> Result<(), Infallible> {
        self.ops.push(DrawOp::UseShader {
            shader: shader.clone(),
        });
        Ok(())
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<(), Infallible> {
        self.ops.push(DrawOp::SetUniform {
            name: name.to_string(),
            value,
        });
        Ok(())
    }

    fn draw_mesh(&mut self, mesh: &MeshId) -> Result<(), Infallible> {
        self.ops.push(DrawOp::DrawMesh { mesh: mesh.clone() });
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), Infallible> {
        self.ops.push(DrawOp::EndFrame);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_one(backend: &mut RecordingBackend) {
        backend.begin_frame([0.0, 0.0, 0.0, 1.0]).unwrap();
        backend.use_shader(&ShaderId::new("table")).unwrap();
        backend.set_uniform("material.shininess", UniformValue::Scalar(32.0)).unwrap();
        backend.draw_mesh(&MeshId::new("pooltable")).unwrap();
        backend.end_frame().unwrap();
    }

    #[test]
    fn records_calls_in_order() {
        let mut backend = RecordingBackend::new();
        record_one(&mut backend);
        assert_eq!(backend.ops().len(), 5);
        assert_eq!(backend.draw_count(), 1);
        assert_eq!(
            backend.ops()[1],
            DrawOp::UseShader {
                shader: ShaderId::new("table")
            }
        );
        assert_eq!(backend.ops()[4], DrawOp::EndFrame);
    }

    #[test]
    fn take_empties_the_log() {
        let mut backend = RecordingBackend::new();
        record_one(&mut backend);
        let ops = backend.take();
        assert_eq!(ops.len(), 5);
        assert!(backend.ops().is_empty());
    }

    #[test]
    fn text_listing() {
        let mut backend = RecordingBackend::new();
        record_one(&mut backend);
        let text = backend.render_text();
        assert!(text.starts_with("=== frame 0 clear=(0.00, 0.00, 0.00, 1.00) ==="));
        assert!(text.contains("use table\n"));
        assert!(text.contains("  material.shininess = 32.000\n"));
        assert!(text.contains("  draw pooltable\n"));
    }

    #[test]
    fn json_is_tagged_by_op() {
        let op = DrawOp::DrawMesh {
            mesh: MeshId::new("ball"),
        };
        let json = serde_json::to_string(&op).unwrap();
        assert_eq!(json, r#"{"op":"draw_mesh","mesh":"ball"}"#);
    }
}
