//! The control-thread side of the shaper.
//!
//! A [`CurveSession`] owns the curve and everything that edits it. Each
//! inbound command follows the same path:
//!
//! ```text
//!   command ─→ constraint engine / preset swap ─→ curve
//!                                                   │
//!                       observers ←── change ───────┤
//!                                                   │
//!                   evaluator reset ─→ table ─→ publisher ─→ audio thread
//! ```
//!
//! The audio thread only holds the [`TableReader`] returned by
//! [`CurveSession::new`].

use log::{debug, info, warn};

use crate::{
    config::ShaperConfig,
    curve::{Curve, CurveChange, CurveEvaluator, CurveObserver, Node, Parameterization, Point},
    edit::{ConstraintEngine, ControlPointMode, DragTarget},
    error::{ConfigError, EditError, PresetError},
    preset::{apply_preset, PresetBank},
    table::{table_channel, PublishOutcome, TablePublisher, TableReader, TransferTable},
};

pub struct CurveSession {
    config: ShaperConfig,
    curve: Curve,
    evaluator: CurveEvaluator,
    engine: ConstraintEngine,
    bank: PresetBank,
    preset_index: usize,
    publisher: TablePublisher,
    observers: Vec<Box<dyn CurveObserver>>,
}

impl CurveSession {
    /// A session on the bypass curve, plus the reader for the audio thread.
    pub fn new(config: ShaperConfig) -> Result<(Self, TableReader), ConfigError> {
        Self::with_state(config, PresetBank::new(), 0, Curve::bypass())
    }

    /// A session restored from a bank, the selected preset and the curve
    /// being edited.
    pub fn with_state(
        config: ShaperConfig,
        bank: PresetBank,
        preset_index: usize,
        curve: Curve,
    ) -> Result<(Self, TableReader), ConfigError> {
        config.validate()?;

        let evaluator = CurveEvaluator::with_parameterization(&curve, config.parameterization);
        let initial = TransferTable::build(&evaluator, config.table_resolution)?;
        let (publisher, reader) = table_channel(initial, config.publish_queue);

        info!(
            "curve session started: {} nodes, {}-point tables",
            curve.len(),
            config.table_resolution
        );

        let preset_index = preset_index.min(bank.len() - 1);
        let session = Self {
            config,
            curve,
            evaluator,
            engine: ConstraintEngine::new(config.control_point_mode),
            bank,
            preset_index,
            publisher,
            observers: Vec::new(),
        };
        Ok((session, reader))
    }

    /* Gestures */

    /// Press on a node's endpoint or handle.
    pub fn pointer_down(&mut self, target: DragTarget) -> Result<(), EditError> {
        self.engine.begin(&self.curve, target)
    }

    /// Move the pressed point towards `position`.
    pub fn pointer_drag(&mut self, position: Point) -> Result<(), EditError> {
        if let Some(change) = self.engine.drag(&mut self.curve, position)? {
            self.curve_changed(change);
        }
        Ok(())
    }

    /// Release the pressed point.
    pub fn pointer_up(&mut self) -> Result<(), EditError> {
        self.engine.end()
    }

    /// Abandon the current gesture, restoring the node it started from.
    pub fn cancel_gesture(&mut self) -> Result<(), EditError> {
        if let Some(change) = self.engine.cancel(&mut self.curve)? {
            self.curve_changed(change);
        }
        Ok(())
    }

    pub fn is_dragging(&self) -> bool {
        self.engine.is_dragging()
    }

    pub fn drag_target(&self) -> Option<DragTarget> {
        self.engine.target()
    }

    pub fn control_point_mode(&self) -> ControlPointMode {
        self.engine.mode()
    }

    pub fn set_control_point_mode(&mut self, mode: ControlPointMode) {
        debug!("control point mode set to {mode:?}");
        self.engine.set_mode(mode);
    }

    /* Presets */

    /// Replace the curve with preset `index`.
    ///
    /// A gesture in progress is ended first; its node may no longer exist.
    pub fn select_preset(&mut self, index: usize) -> Result<(), PresetError> {
        let preset = self.bank.select(index)?;
        self.engine.abandon();

        info!("loading preset {index} '{}'", preset.name);
        let change = apply_preset(&mut self.curve, preset.nodes());
        self.preset_index = index;
        self.curve_changed(change);
        Ok(())
    }

    /// Add an identity-like preset of `node_count` nodes and load it.
    pub fn create_preset(
        &mut self,
        name: impl Into<String>,
        node_count: usize,
    ) -> Result<usize, PresetError> {
        let index = self
            .bank
            .create(name, node_count)
            .inspect_err(|err| warn!("preset not created: {err}"))?;
        self.select_preset(index)?;
        Ok(index)
    }

    /// Save the current curve under `name` and make it the selected preset.
    pub fn store_preset(&mut self, name: impl Into<String>) -> usize {
        let index = self.bank.store_current(name, &self.curve);
        self.preset_index = index;
        index
    }

    pub fn bank(&self) -> &PresetBank {
        &self.bank
    }

    pub fn preset_index(&self) -> usize {
        self.preset_index
    }

    /* Evaluation and publication */

    pub fn parameterization(&self) -> Parameterization {
        self.evaluator.parameterization()
    }

    /// Switch parameterization and republish.
    pub fn set_parameterization(&mut self, parameterization: Parameterization) {
        if self.evaluator.parameterization() != parameterization {
            self.evaluator.set_parameterization(parameterization);
            self.rebuild();
        }
    }

    /// Resample the curve and hand the new table to the audio thread.
    pub fn rebuild(&mut self) -> PublishOutcome {
        self.evaluator.reset(&self.curve);
        self.publisher.publish(&self.evaluator)
    }

    /// Retry a table held back because the audio thread fell behind.
    pub fn flush(&mut self) -> PublishOutcome {
        self.publisher.flush()
    }

    /// Generation of the newest table built.
    pub fn generation(&self) -> u64 {
        self.publisher.generation()
    }

    pub fn evaluator(&self) -> &CurveEvaluator {
        &self.evaluator
    }

    /// Curve value at `x`, computed directly rather than from a table.
    pub fn evaluate(&self, x: f32) -> f32 {
        self.evaluator.evaluate(x)
    }

    /* Read access */

    pub fn subscribe(&mut self, observer: impl CurveObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    pub fn len(&self) -> usize {
        self.curve.len()
    }

    /// Never true; a curve always has two nodes.
    pub fn is_empty(&self) -> bool {
        self.curve.is_empty()
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.curve.node(index)
    }

    pub fn nodes(&self) -> &[Node] {
        self.curve.nodes()
    }

    pub fn domain(&self) -> (f32, f32) {
        self.curve.domain()
    }

    pub fn config(&self) -> &ShaperConfig {
        &self.config
    }

    /// Snapshot for saving to disk.
    #[cfg(feature = "serde")]
    pub fn to_stored(&self) -> crate::preset::StoredBank {
        crate::preset::StoredBank::new(&self.bank, self.preset_index, &self.curve)
    }

    fn curve_changed(&mut self, change: CurveChange) {
        for observer in &mut self.observers {
            observer.curve_changed(&self.curve, &change);
        }
        self.rebuild();
    }
}
