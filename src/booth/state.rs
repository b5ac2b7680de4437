use crate::capture::Snapshot;
use crate::catalog::Catalog;
use crate::composite::{CompositeSpec, clamp_caption};
use crate::foundation::error::{BoothError, BoothResult};

/// Screen of the booth flow, in order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoothStep {
    /// Choosing a layout.
    #[default]
    Layout,
    /// Choosing a theme.
    Design,
    /// Entering a caption.
    Text,
    /// Capturing photos.
    Camera,
    /// Reviewing and exporting the strip.
    Editor,
}

/// User or controller event fed to [`PhotoBoothState::reduce`].
#[derive(Clone, Debug, PartialEq)]
pub enum BoothEvent {
    /// Layout picked by id.
    SelectLayout(String),
    /// Theme picked by id.
    SelectTheme(String),
    /// Caption confirmed (may be empty).
    SubmitCaption(String),
    /// The capture controller handed off a complete photo set.
    PhotosCaptured(Vec<Snapshot>),
    /// Editor grayscale switch.
    ToggleGrayscale,
    /// Go back one step; from the editor this starts over.
    Back,
}

/// Booth-wide selections and the current step.
///
/// State is replaced wholesale by [`reduce`](Self::reduce); events that do not apply to the
/// current step leave it unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PhotoBoothState {
    step: BoothStep,
    layout: Option<String>,
    theme: Option<String>,
    caption: String,
    photos: Vec<Snapshot>,
    grayscale: bool,
}

impl PhotoBoothState {
    /// Initial state: layout selection, nothing chosen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step.
    pub fn step(&self) -> BoothStep {
        self.step
    }

    /// Selected layout id.
    pub fn layout_id(&self) -> Option<&str> {
        self.layout.as_deref()
    }

    /// Selected theme id.
    pub fn theme_id(&self) -> Option<&str> {
        self.theme.as_deref()
    }

    /// Caption text.
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Captured photos handed off by the controller.
    pub fn photos(&self) -> &[Snapshot] {
        &self.photos
    }

    /// Editor grayscale flag.
    pub fn grayscale(&self) -> bool {
        self.grayscale
    }

    /// Apply `event` and return the next state.
    pub fn reduce(self, event: BoothEvent) -> Self {
        let from = self.step;
        let next = match (self.step, event) {
            (BoothStep::Layout, BoothEvent::SelectLayout(id)) => Self {
                step: BoothStep::Design,
                layout: Some(id),
                ..self
            },
            (BoothStep::Design, BoothEvent::SelectTheme(id)) => Self {
                step: BoothStep::Text,
                theme: Some(id),
                ..self
            },
            (BoothStep::Text, BoothEvent::SubmitCaption(text)) => Self {
                step: BoothStep::Camera,
                caption: clamp_caption(&text),
                ..self
            },
            (BoothStep::Camera, BoothEvent::PhotosCaptured(photos)) => Self {
                step: BoothStep::Editor,
                photos,
                ..self
            },
            (BoothStep::Editor, BoothEvent::ToggleGrayscale) => Self {
                grayscale: !self.grayscale,
                ..self
            },
            (BoothStep::Editor, BoothEvent::Back) => Self::new(),
            (step, BoothEvent::Back) => Self {
                step: match step {
                    BoothStep::Design => BoothStep::Layout,
                    BoothStep::Text => BoothStep::Design,
                    BoothStep::Camera => BoothStep::Text,
                    other => other,
                },
                ..self
            },
            (_, _) => {
                tracing::debug!(?from, "event ignored at this step");
                self
            }
        };
        if next.step != from {
            tracing::debug!(?from, to = ?next.step, "booth step changed");
        }
        next
    }

    /// Build the render input for the editor.
    ///
    /// Fails outside the editor step or when a selected id is missing from `catalog`.
    pub fn composite_spec(&self, catalog: &Catalog) -> BoothResult<CompositeSpec> {
        if self.step != BoothStep::Editor {
            return Err(BoothError::validation(format!(
                "composite requires the editor step (current: {:?})",
                self.step
            )));
        }
        let layout = catalog.layout(self.layout.as_deref().unwrap_or_default())?;
        let theme = catalog.theme(self.theme.as_deref().unwrap_or_default())?;
        Ok(CompositeSpec::new(layout.clone(), theme.clone())
            .with_caption(&self.caption)
            .with_grayscale(self.grayscale)
            .with_images(self.photos.clone()))
    }
}

/// True when the transition `prev -> next` leaves the camera step, so the camera must be released.
pub fn leaves_capture(prev: &PhotoBoothState, next: &PhotoBoothState) -> bool {
    prev.step == BoothStep::Camera && next.step != BoothStep::Camera
}

/// True when the transition `prev -> next` enters the camera step.
pub fn enters_capture(prev: &PhotoBoothState, next: &PhotoBoothState) -> bool {
    prev.step != BoothStep::Camera && next.step == BoothStep::Camera
}

#[cfg(test)]
#[path = "../../tests/unit/booth/state.rs"]
mod tests;
