//! The themed force-directed graph view.
//!
//! The graph is built once per dataset: nodes, links, and the arrowhead
//! marker are created when the simulation script is available and never
//! rebuilt afterwards. Theme changes restyle the existing scene in place,
//! touching only colors so node positions and simulation state survive the
//! transition.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, warn};

use verso_domain::theming::{Palette, ThemeChangedEvent};

/// URL of the external simulation library the graph depends on.
pub const SIMULATION_SCRIPT_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/d3/5.11.0/d3.min.js";

pub const WIDTH: f64 = 5000.0;
pub const HEIGHT: f64 = 320.0;
pub const NODE_RADIUS: f64 = 15.0;
pub const ARROW_SIZE: f64 = 6.0;

const LINK_STROKE_WIDTH: f64 = 2.0;
const NODE_STROKE_WIDTH: f64 = 1.0;
const DRAG_ALPHA_TARGET: f64 = 0.3;

/// Tuning knobs for the force layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationOptions {
    pub charge_strength: f64,
    pub link_distance: f64,
    pub link_strength: f64,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            charge_strength: -50.0,
            link_distance: 100.0,
            link_strength: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub id: String,
}

/// A directed edge between two node ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Default)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

/// The running force layout. Implementations own node kinematics; the view
/// only reads positions and forwards drag gestures.
pub trait ForceSimulation {
    /// Current position of every node, by id.
    fn positions(&self) -> HashMap<String, Point>;

    fn set_alpha_target(&mut self, target: f64);

    fn restart(&mut self);

    /// Pins a node at a position so forces stop moving it.
    fn fix_node(&mut self, id: &str, at: Point);

    /// Moves an already pinned node.
    fn move_fixed_node(&mut self, id: &str, at: Point);
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowheadMarker {
    pub size: f64,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinkLine {
    pub source: String,
    pub target: String,
    pub from: Point,
    pub to: Point,
    pub stroke: String,
    pub stroke_width: f64,
}

/// A node-id caption rendered inside its circle.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeLabel {
    pub text: String,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeCircle {
    pub id: String,
    pub center: Point,
    pub radius: f64,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    /// Present only when the graph was built with node ids shown.
    pub label: Option<NodeLabel>,
}

/// The built scene: one marker, the link lines, and the node circles.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub marker: ArrowheadMarker,
    pub links: Vec<LinkLine>,
    pub nodes: Vec<NodeCircle>,
}

/// Frame and caption colors around the graph viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphFrame {
    pub border: String,
    pub caption_background: String,
    pub caption_text: String,
}

impl GraphFrame {
    fn styled(palette: &Palette) -> Self {
        Self {
            border: palette.accent.to_string(),
            caption_background: palette.offset.to_string(),
            caption_text: palette.text.to_string(),
        }
    }
}

/// A force-directed graph bound to one dataset.
pub struct DirectedGraph {
    data: GraphData,
    options: SimulationOptions,
    show_node_ids: bool,
    scene: Option<Scene>,
    frame: Option<GraphFrame>,
}

impl DirectedGraph {
    pub fn new(data: GraphData) -> Self {
        Self::with_options(data, SimulationOptions::default())
    }

    pub fn with_options(data: GraphData, options: SimulationOptions) -> Self {
        Self {
            data,
            options,
            show_node_ids: false,
            scene: None,
            frame: None,
        }
    }

    /// Renders the node ids inside their circles. Off by default.
    pub fn with_node_ids(mut self) -> Self {
        self.show_node_ids = true;
        self
    }

    pub fn options(&self) -> SimulationOptions {
        self.options
    }

    /// The current scene, if the graph has been built.
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn frame(&self) -> Option<&GraphFrame> {
        self.frame.as_ref()
    }

    /// Builds the scene from the simulation's current positions. A second
    /// call is a no-op; the scene is created once and restyled thereafter.
    pub fn build(&mut self, simulation: &dyn ForceSimulation, palette: &Palette) {
        if self.scene.is_some() {
            return;
        }
        let positions = simulation.positions();
        let position_of = |id: &str| positions.get(id).copied().unwrap_or_default();

        let marker = ArrowheadMarker {
            size: ARROW_SIZE,
            fill: palette.text.to_string(),
        };
        let links = self
            .data
            .links
            .iter()
            .map(|link| LinkLine {
                source: link.source.clone(),
                target: link.target.clone(),
                from: position_of(&link.source),
                to: position_of(&link.target),
                stroke: palette.text.to_string(),
                stroke_width: LINK_STROKE_WIDTH,
            })
            .collect();
        let nodes = self
            .data
            .nodes
            .iter()
            .map(|node| NodeCircle {
                id: node.id.clone(),
                center: position_of(&node.id),
                radius: NODE_RADIUS,
                fill: palette.background.to_string(),
                stroke: palette.text.to_string(),
                stroke_width: NODE_STROKE_WIDTH,
                label: self.show_node_ids.then(|| NodeLabel {
                    text: node.id.clone(),
                    fill: palette.text.to_string(),
                }),
            })
            .collect();

        self.scene = Some(Scene {
            marker,
            links,
            nodes,
        });
        self.frame = Some(GraphFrame::styled(palette));
        debug!(
            "Graph scene built with {} nodes and {} links",
            self.data.nodes.len(),
            self.data.links.len()
        );
    }

    /// Re-applies colors from `palette` to the existing scene. Geometry is
    /// left untouched.
    pub fn restyle(&mut self, palette: &Palette) {
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        scene.marker.fill = palette.text.to_string();
        for link in &mut scene.links {
            link.stroke = palette.text.to_string();
        }
        for node in &mut scene.nodes {
            node.fill = palette.background.to_string();
            node.stroke = palette.text.to_string();
            if let Some(label) = &mut node.label {
                label.fill = palette.text.to_string();
            }
        }
        self.frame = Some(GraphFrame::styled(palette));
        debug!("Graph scene restyled");
    }

    /// Copies the simulation's current positions into the scene.
    pub fn tick(&mut self, simulation: &dyn ForceSimulation) {
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        let positions = simulation.positions();
        for node in &mut scene.nodes {
            if let Some(at) = positions.get(&node.id) {
                node.center = *at;
            }
        }
        for link in &mut scene.links {
            if let Some(at) = positions.get(&link.source) {
                link.from = *at;
            }
            if let Some(at) = positions.get(&link.target) {
                link.to = *at;
            }
        }
    }

    /// Begins a drag gesture: reheats the simulation and pins the node.
    pub fn drag_start(&self, simulation: &mut dyn ForceSimulation, id: &str, at: Point) {
        simulation.set_alpha_target(DRAG_ALPHA_TARGET);
        simulation.restart();
        simulation.fix_node(id, at);
    }

    /// Continues a drag gesture by moving the pinned node.
    pub fn drag(&self, simulation: &mut dyn ForceSimulation, id: &str, at: Point) {
        simulation.move_fixed_node(id, at);
    }

    /// Ends a drag gesture, letting the simulation cool back down.
    pub fn drag_end(&self, simulation: &mut dyn ForceSimulation) {
        simulation.set_alpha_target(0.0);
    }
}

/// Restyles `graph` on every theme transition until the event channel
/// closes. Meant to be spawned alongside the graph's owner.
pub async fn follow_theme(
    graph: Arc<Mutex<DirectedGraph>>,
    mut events: broadcast::Receiver<ThemeChangedEvent>,
) {
    loop {
        match events.recv().await {
            Ok(event) => graph.lock().await.restyle(&event.new_state.colors),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!("Missed {} theme events, catching up", skipped);
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
