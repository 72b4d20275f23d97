//! The raw markup block controller.
//!
//! Owns the block's data, view tree, and timers between host calls. The host
//! constructs it from persisted data, calls [`RawBlock::render`] to obtain a
//! root node, routes user interactions back through [`RawBlock::dispatch`]
//! and [`RawBlock::advance`], and calls [`RawBlock::save`] to extract data
//! for persistence.

use serde::{Deserialize, Serialize};

use crate::markup;
use crate::timers::{TimerId, Timers};
use crate::tool::{BlockTool, HostApi, SanitizeConfig, StyleClasses, ToolboxEntry};
use crate::view::{Action, NodeId, Tag, ViewEvent, ViewTree};

/// Delay before the post-render resize pass, in logical time units. Content
/// height cannot be measured synchronously at first paint.
pub const RENDER_SETTLE: u64 = 100;

/// Debounce window for input-driven resizes. Data capture is never debounced;
/// only the layout pass is.
pub const RESIZE_DEBOUNCE: u64 = 200;

const WRAPPER_CLASS: &str = "rawmark";
const TEXTAREA_CLASS: &str = "rawmark__textarea";

const DEFAULT_PLACEHOLDER: &str = "Enter HTML code";
const LABEL_TO_PREVIEW: &str = "Switch to render mode";
const LABEL_TO_SOURCE: &str = "Switch to HTML mode";

const ICON_HTML: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none"><path stroke="currentColor" stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M7.6 8.6 4.2 12l3.4 3.4m8.8-6.8 3.4 3.4-3.4 3.4M13.2 6l-2.4 12"/></svg>"#;

/// The block's only persisted entity: one piece of unstructured markup text.
///
/// The `html` field always reflects the exact contents of the source surface
/// at save time; it is never transformed, escaped, or trimmed here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBlockData {
    #[serde(default)]
    pub html: String,
}

/// Host-supplied per-block configuration.
#[derive(Debug, Clone, Default)]
pub struct BlockConfig {
    /// Overrides the prompt text shown while the source surface is empty.
    pub placeholder: Option<String>,
}

/// Which of the two views is currently visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Raw markup text is directly editable.
    Source,
    /// Markup is interpreted and displayed as rendered content.
    Preview,
}

struct Css {
    block: String,
    input: String,
}

/// Dual-mode raw markup block: editable source view plus rendered preview.
///
/// All mutable state lives behind this one instance; the host treats the
/// returned root [`NodeId`] as opaque except for passing it back to
/// [`RawBlock::save`].
pub struct RawBlock {
    data: RawBlockData,
    mode: Mode,
    read_only: bool,
    placeholder: String,
    label_to_preview: String,
    label_to_source: String,
    css: Css,

    view: ViewTree,
    timers: Timers,
    wrapper: Option<NodeId>,
    textarea: Option<NodeId>,
    preview: Option<NodeId>,
    switch_button: Option<NodeId>,

    /// At most one outstanding debounced resize; a new input event cancels
    /// and replaces it.
    pending_resize: Option<TimerId>,
    /// One-shot post-render resize. Not cancelled by input; firing late is
    /// harmless since resize only reads current content.
    settle_timer: Option<TimerId>,
    resize_passes: u64,
}

impl RawBlock {
    /// Builds a block from persisted data. Never fails: missing `html`
    /// defaults to empty (via serde), a missing placeholder falls back to
    /// the host-localized default. Localized strings and style class names
    /// are resolved once, here.
    pub fn new(
        data: RawBlockData,
        config: BlockConfig,
        api: &dyn HostApi,
        read_only: bool,
    ) -> Self {
        let StyleClasses { block, input } = api.styles();
        let placeholder = config
            .placeholder
            .unwrap_or_else(|| api.translate(DEFAULT_PLACEHOLDER));

        Self {
            data,
            mode: Mode::Source,
            read_only,
            placeholder,
            label_to_preview: api.translate(LABEL_TO_PREVIEW),
            label_to_source: api.translate(LABEL_TO_SOURCE),
            css: Css { block, input },
            view: ViewTree::new(),
            timers: Timers::new(),
            wrapper: None,
            textarea: None,
            preview: None,
            switch_button: None,
            pending_resize: None,
            settle_timer: None,
            resize_passes: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Read access to the view tree, for the host's event routing and for
    /// serializing the rendered block.
    pub fn view(&self) -> &ViewTree {
        &self.view
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    /// Number of resize passes run so far.
    pub fn resize_passes(&self) -> u64 {
        self.resize_passes
    }

    /// Builds the block's view and returns the root container.
    ///
    /// Idempotent in effect: on an already-rendered instance the same root is
    /// cleared and rebuilt in place, so repeated calls never accumulate stale
    /// children. Children are created in fixed order: source surface, preview
    /// surface, mode-switch control. Rebuilding also rebinds the input action
    /// on the fresh source surface, dropping events aimed at surfaces from an
    /// earlier render.
    pub fn render(&mut self) -> NodeId {
        let wrapper = match self.wrapper {
            Some(wrapper) => {
                self.view.clear_children(wrapper);
                wrapper
            }
            None => {
                let wrapper = self.view.create_element(Tag::Container);
                self.wrapper = Some(wrapper);
                wrapper
            }
        };
        {
            let el = self.view.get_mut(wrapper);
            el.add_class(&self.css.block);
            el.add_class(WRAPPER_CLASS);
        }

        let textarea = self.view.create_element(Tag::TextArea);
        {
            let el = self.view.get_mut(textarea);
            el.add_class(TEXTAREA_CLASS);
            el.add_class(&self.css.input);
            el.value = self.data.html.clone();
            el.placeholder = self.placeholder.clone();
            el.action = Some(Action::EditSource);
            el.disabled = self.read_only;
        }

        let preview = self.view.create_element(Tag::Container);
        self.view.get_mut(preview).add_class(WRAPPER_CLASS);

        let button = self.view.create_element(Tag::Button);
        {
            let el = self.view.get_mut(button);
            el.value = match self.mode {
                Mode::Source => self.label_to_preview.clone(),
                Mode::Preview => self.label_to_source.clone(),
            };
            el.action = Some(Action::SwitchMode);
        }

        self.textarea = Some(textarea);
        self.preview = Some(preview);
        self.switch_button = Some(button);

        let in_source = self.mode == Mode::Source;
        self.view.get_mut(textarea).visible = in_source;
        self.view.get_mut(preview).visible = !in_source;
        if self.mode == Mode::Preview {
            self.update_preview();
        }

        self.view.append_child(wrapper, textarea);
        self.view.append_child(wrapper, preview);
        self.view.append_child(wrapper, button);

        self.settle_timer = Some(self.timers.schedule(RENDER_SETTLE));

        wrapper
    }

    /// Toggles between source and preview, then rebuilds the view so the
    /// switch-control label and surface visibility stay consistent.
    ///
    /// Entering preview re-hosts executable fragments: markup inserted as
    /// inert content never executes, so each script found in the source text
    /// is re-created as a fresh executable node in the preview surface.
    pub fn switch_mode(&mut self) {
        self.mode = match self.mode {
            Mode::Source => Mode::Preview,
            Mode::Preview => Mode::Source,
        };
        log::debug!("mode switched to {:?}", self.mode);

        self.render();
        if self.mode == Mode::Preview {
            self.rehost_scripts();
        }
    }

    /// Delivers a user interaction to the block.
    ///
    /// Text input targeting the current source surface is captured into
    /// `data.html` synchronously and unconditionally; only the resize pass is
    /// debounced. Input aimed at a stale or disabled surface is dropped.
    pub fn dispatch(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::Input { node, value } => {
                if self.textarea != Some(node) || self.view.get(node).disabled {
                    return;
                }
                self.view.get_mut(node).value = value.clone();
                self.data.html = value;
                self.schedule_resize();
            }
            ViewEvent::Click { node } => {
                if self.switch_button == Some(node) {
                    self.switch_mode();
                }
            }
        }
    }

    /// Advances the block's logical clock, running any resize pass that came
    /// due. Every timer this block schedules is a resize trigger.
    pub fn advance(&mut self, dt: u64) {
        for id in self.timers.advance(dt) {
            if self.pending_resize == Some(id) {
                self.pending_resize = None;
            }
            if self.settle_timer == Some(id) {
                self.settle_timer = None;
            }
            self.resize();
        }
    }

    /// Extracts current data by reading the source surface inside `root`
    /// directly, not the cached `html` field, so save stays correct even if
    /// the cache were ever to lag. Pure.
    pub fn save(&self, root: NodeId) -> RawBlockData {
        let html = self
            .view
            .find_by_tag(root, Tag::TextArea)
            .map(|node| self.view.get(node).value.clone())
            .unwrap_or_default();
        RawBlockData { html }
    }

    /// Copies the current source text verbatim into the preview surface's
    /// markup slot.
    fn update_preview(&mut self) {
        let (Some(textarea), Some(preview)) = (self.textarea, self.preview) else {
            return;
        };
        let markup_text = self.view.get(textarea).value.clone();
        self.view.clear_children(preview);
        let slot = self.view.create_element(Tag::Raw);
        self.view.get_mut(slot).value = markup_text;
        self.view.append_child(preview, slot);
    }

    /// Best-effort script re-hosting: scans the current markup for script
    /// elements and appends an equivalent executable node per script into the
    /// preview surface, copying attributes and inline body. Absence of
    /// scripts or malformed structure never blocks entering preview.
    fn rehost_scripts(&mut self) {
        let Some(preview) = self.preview else {
            return;
        };
        let fragments = markup::extract_scripts(&self.data.html);
        if fragments.is_empty() {
            return;
        }
        log::debug!("re-hosting {} script fragment(s) into preview", fragments.len());
        for fragment in fragments {
            let node = self.view.create_element(Tag::Script);
            let el = self.view.get_mut(node);
            el.attrs = fragment.attrs;
            el.value = fragment.body;
            self.view.append_child(preview, node);
        }
    }

    /// Cancel-if-present, then schedule-new: a typing burst collapses into a
    /// single resize pass shortly after the user pauses.
    fn schedule_resize(&mut self) {
        if let Some(id) = self.pending_resize.take() {
            self.timers.cancel(id);
        }
        self.pending_resize = Some(self.timers.schedule(RESIZE_DEBOUNCE));
    }

    /// Fits the source surface's height to exactly its content: reset to
    /// intrinsic, then pin to the measured extent. Re-invocable with no
    /// effect beyond height.
    fn resize(&mut self) {
        let Some(textarea) = self.textarea else {
            return;
        };
        self.view.get_mut(textarea).height = None;
        let height = self.view.content_height(textarea);
        self.view.get_mut(textarea).height = Some(height);
        self.resize_passes += 1;
        log::debug!("resized source surface to {height} units");
    }
}

impl Drop for RawBlock {
    fn drop(&mut self) {
        // Leave no dangling callback behind a discarded surface
        if let Some(id) = self.pending_resize.take() {
            self.timers.cancel(id);
        }
    }
}

impl BlockTool for RawBlock {
    type Data = RawBlockData;

    fn render(&mut self) -> NodeId {
        RawBlock::render(self)
    }

    fn save(&self, root: NodeId) -> RawBlockData {
        RawBlock::save(self, root)
    }

    fn is_read_only_supported() -> bool {
        true
    }

    fn display_in_toolbox() -> bool {
        true
    }

    fn enable_line_breaks() -> bool {
        true
    }

    fn toolbox() -> ToolboxEntry {
        ToolboxEntry {
            icon: ICON_HTML,
            title: "Raw HTML",
        }
    }

    /// The block's entire purpose is author-supplied raw markup, so the host
    /// sanitizer is told to leave the field alone. A deliberate trust
    /// boundary, not an oversight.
    fn sanitize() -> SanitizeConfig {
        SanitizeConfig::new().allow_all("html")
    }
}
