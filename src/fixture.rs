//! In-memory page used by behavior tests.
//!
//! [`FakeDocument`] implements [`DocumentContext`] over a flat element arena
//! with just enough selector support for the markup conventions in
//! [`crate::consts`]: tag names, `#id`, `.class` chains, `[attr]` and
//! `[attr="value"]`, and comma-separated alternatives. Events are delivered
//! only through the explicit dispatch helpers, animation frames queue until
//! [`FakeDocument::run_frames`], and spawned tasks run on a `LocalPool` until
//! [`FakeDocument::run_tasks`].

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::rc::{Rc, Weak};

use futures::channel::oneshot;
use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;

use crate::dom::{DocumentContext, DomEvent, EventKind, Handler, ListenOptions, ScrollMetrics, Target};
use crate::storage::{Storage, StorageError};
use crate::subscription::Subscription;
use crate::transport::{Response, Transport, TransportError};

const ROOT: NodeId = NodeId(0);
const BODY: NodeId = NodeId(1);

/// Handle to one fake element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Default)]
struct Node {
    tag: String,
    parent: Option<NodeId>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: Option<String>,
    styles: BTreeMap<String, String>,
    disabled: bool,
    value: Option<String>,
    /// The `value` attribute a form reset restores.
    default_value: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ListenerTarget {
    Element(NodeId),
    Document,
    Window,
}

struct Listener {
    id: u64,
    target: ListenerTarget,
    kind: EventKind,
    options: ListenOptions,
    handler: Rc<RefCell<Handler>>,
}

type Registry = Rc<RefCell<Vec<Listener>>>;

pub struct FakeDocument {
    nodes: RefCell<Vec<Node>>,
    listeners: Registry,
    next_listener: Cell<u64>,
    frames: RefCell<Vec<Box<dyn FnOnce()>>>,
    style_writes: Cell<usize>,
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
    metrics: Cell<ScrollMetrics>,
    path: RefCell<String>,
    ready: Cell<bool>,
}

impl FakeDocument {
    /// An empty, fully parsed page at `/contact`.
    pub fn new() -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        let root = Node { tag: "html".to_owned(), ..Node::default() };
        let body = Node { tag: "body".to_owned(), parent: Some(ROOT), ..Node::default() };
        Self {
            nodes: RefCell::new(vec![root, body]),
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_listener: Cell::new(0),
            frames: RefCell::new(Vec::new()),
            style_writes: Cell::new(0),
            pool: RefCell::new(pool),
            spawner,
            metrics: Cell::new(ScrollMetrics::default()),
            path: RefCell::new("/contact".to_owned()),
            ready: Cell::new(true),
        }
    }

    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    // --- Building the page ---

    /// Append a `tag` element with space-separated `classes` to the body.
    pub fn element(&self, tag: &str, classes: &str) -> NodeId {
        self.child(BODY, tag, classes)
    }

    /// Append a `tag` element with space-separated `classes` to `parent`.
    pub fn child(&self, parent: NodeId, tag: &str, classes: &str) -> NodeId {
        let id = self.insert(tag);
        let mut nodes = self.nodes.borrow_mut();
        let node = &mut nodes[id.0];
        node.parent = Some(parent);
        node.classes = classes.split_whitespace().map(str::to_owned).collect();
        id
    }

    /// Append a named text input with an empty initial value to `form`.
    pub fn field(&self, form: NodeId, name: &str) -> NodeId {
        self.field_with_default(form, name, "")
    }

    /// Append a named input whose `value` attribute is `default`.
    pub fn field_with_default(&self, form: NodeId, name: &str, default: &str) -> NodeId {
        let id = self.child(form, "input", "");
        let mut nodes = self.nodes.borrow_mut();
        let node = &mut nodes[id.0];
        node.attributes.insert("name".to_owned(), name.to_owned());
        node.attributes.insert("value".to_owned(), default.to_owned());
        node.value = Some(default.to_owned());
        node.default_value = Some(default.to_owned());
        id
    }

    pub fn type_into(&self, field: NodeId, value: &str) {
        self.nodes.borrow_mut()[field.0].value = Some(value.to_owned());
    }

    pub fn set_scroll(&self, scroll_top: f64, scroll_height: f64, viewport_height: f64) {
        self.metrics.set(ScrollMetrics { scroll_top, scroll_height, viewport_height });
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.set(ready);
    }

    pub fn set_path(&self, path: &str) {
        *self.path.borrow_mut() = path.to_owned();
    }

    // --- Inspecting the page ---

    pub fn root_id(&self) -> NodeId {
        ROOT
    }

    pub fn body_id(&self) -> NodeId {
        BODY
    }

    pub fn value(&self, field: NodeId) -> Option<String> {
        self.nodes.borrow()[field.0].value.clone()
    }

    pub fn text(&self, id: NodeId) -> Option<String> {
        self.nodes.borrow()[id.0].text.clone()
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<String> {
        self.nodes.borrow()[id.0].styles.get(property).cloned()
    }

    pub fn is_disabled(&self, id: NodeId) -> bool {
        self.nodes.borrow()[id.0].disabled
    }

    /// Connected elements carrying `class`.
    pub fn count_with_class(&self, class: &str) -> usize {
        self.query_all(&format!(".{class}")).len()
    }

    /// Total inline style writes since the page was created.
    pub fn style_writes(&self) -> usize {
        self.style_writes.get()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Options of the first window listener for `kind`.
    pub fn window_listener_options(&self, kind: EventKind) -> Option<ListenOptions> {
        self.listeners
            .borrow()
            .iter()
            .find(|l| l.target == ListenerTarget::Window && l.kind == kind)
            .map(|l| l.options)
    }

    // --- Driving the page ---

    pub fn click(&self, id: NodeId) -> DomEvent {
        self.dispatch(ListenerTarget::Element(id), DomEvent::new(EventKind::Click))
    }

    pub fn submit(&self, form: NodeId) -> DomEvent {
        self.dispatch(ListenerTarget::Element(form), DomEvent::new(EventKind::Submit))
    }

    pub fn press_key(&self, key: &str) -> DomEvent {
        self.dispatch(ListenerTarget::Document, DomEvent::key_down(key))
    }

    pub fn fire_document(&self, kind: EventKind) -> DomEvent {
        self.dispatch(ListenerTarget::Document, DomEvent::new(kind))
    }

    pub fn fire_window(&self, kind: EventKind) -> DomEvent {
        self.dispatch(ListenerTarget::Window, DomEvent::new(kind))
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.borrow().len()
    }

    /// Run every queued animation-frame callback; returns how many ran.
    pub fn run_frames(&self) -> usize {
        let frames = std::mem::take(&mut *self.frames.borrow_mut());
        let count = frames.len();
        for frame in frames {
            frame();
        }
        count
    }

    /// Poll spawned tasks until none can make progress.
    pub fn run_tasks(&self) {
        self.pool.borrow_mut().run_until_stalled();
    }

    fn dispatch(&self, target: ListenerTarget, event: DomEvent) -> DomEvent {
        let handlers = self
            .listeners
            .borrow()
            .iter()
            .filter(|l| l.target == target && l.kind == event.kind())
            .map(|l| Rc::clone(&l.handler))
            .collect::<Vec<_>>();
        for handler in handlers {
            (handler.borrow_mut())(&event);
        }
        event
    }

    fn insert(&self, tag: &str) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(Node { tag: tag.to_ascii_lowercase(), ..Node::default() });
        NodeId(nodes.len() - 1)
    }

    fn is_descendant(nodes: &[Node], id: NodeId, ancestor: NodeId) -> bool {
        let mut current = nodes[id.0].parent;
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = nodes[parent.0].parent;
        }
        false
    }

    fn matching(&self, selector: &str, within: Option<NodeId>) -> Vec<NodeId> {
        let alternatives = parse_selector(selector);
        let nodes = self.nodes.borrow();
        (0..nodes.len())
            .map(NodeId)
            .filter(|&id| match within {
                Some(root) => Self::is_descendant(&nodes, id, root),
                None => id == ROOT || Self::is_descendant(&nodes, id, ROOT),
            })
            .filter(|&id| alternatives.iter().any(|c| c.matches(&nodes[id.0])))
            .collect()
    }
}

impl DocumentContext for FakeDocument {
    type Element = NodeId;

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.matching(selector, None).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.matching(selector, None)
    }

    fn query_within(&self, root: &NodeId, selector: &str) -> Option<NodeId> {
        self.matching(selector, Some(*root)).into_iter().next()
    }

    fn root(&self) -> Option<NodeId> {
        Some(ROOT)
    }

    fn body(&self) -> Option<NodeId> {
        Some(BODY)
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        Some(self.insert(tag))
    }

    fn append_to_body(&self, element: &NodeId) {
        self.nodes.borrow_mut()[element.0].parent = Some(BODY);
    }

    fn has_class(&self, element: &NodeId, class: &str) -> bool {
        self.nodes.borrow()[element.0].classes.iter().any(|c| c == class)
    }

    fn set_class(&self, element: &NodeId, class: &str, on: bool) {
        let mut nodes = self.nodes.borrow_mut();
        let classes = &mut nodes[element.0].classes;
        let present = classes.iter().any(|c| c == class);
        if on && !present {
            classes.push(class.to_owned());
        } else if !on {
            classes.retain(|c| c != class);
        }
    }

    fn toggle_class(&self, element: &NodeId, class: &str) -> bool {
        let on = !self.has_class(element, class);
        self.set_class(element, class, on);
        on
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        self.nodes.borrow()[element.0].attributes.get(name).cloned()
    }

    fn set_attribute(&self, element: &NodeId, name: &str, value: &str) {
        self.nodes.borrow_mut()[element.0].attributes.insert(name.to_owned(), value.to_owned());
    }

    fn text_content(&self, element: &NodeId) -> Option<String> {
        self.text(*element)
    }

    fn set_text_content(&self, element: &NodeId, text: &str) {
        self.nodes.borrow_mut()[element.0].text = Some(text.to_owned());
    }

    fn set_style(&self, element: &NodeId, property: &str, value: &str) {
        self.style_writes.set(self.style_writes.get() + 1);
        self.nodes.borrow_mut()[element.0].styles.insert(property.to_owned(), value.to_owned());
    }

    fn set_disabled(&self, element: &NodeId, disabled: bool) {
        self.nodes.borrow_mut()[element.0].disabled = disabled;
    }

    fn form_fields(&self, form: &NodeId) -> Vec<(String, String)> {
        let nodes = self.nodes.borrow();
        (0..nodes.len())
            .map(NodeId)
            .filter(|&id| Self::is_descendant(&nodes, id, *form))
            .filter_map(|id| {
                let node = &nodes[id.0];
                if node.disabled {
                    return None;
                }
                let name = node.attributes.get("name")?;
                let value = node.value.as_ref()?;
                Some((name.clone(), value.clone()))
            })
            .collect()
    }

    fn reset_form(&self, form: &NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        let fields = (0..nodes.len())
            .map(NodeId)
            .filter(|&id| Self::is_descendant(&nodes, id, *form))
            .collect::<Vec<_>>();
        for id in fields {
            let node = &mut nodes[id.0];
            if node.value.is_some() {
                node.value.clone_from(&node.default_value);
            }
        }
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        self.metrics.get()
    }

    fn location_path(&self) -> String {
        self.path.borrow().clone()
    }

    fn is_ready(&self) -> bool {
        self.ready.get()
    }

    fn listen(
        &self,
        target: Target<'_, NodeId>,
        kind: EventKind,
        options: ListenOptions,
        handler: Handler,
    ) -> Subscription {
        let target = match target {
            Target::Element(id) => ListenerTarget::Element(*id),
            Target::Document => ListenerTarget::Document,
            Target::Window => ListenerTarget::Window,
        };
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        self.listeners.borrow_mut().push(Listener {
            id,
            target,
            kind,
            options,
            handler: Rc::new(RefCell::new(handler)),
        });

        let registry: Weak<RefCell<Vec<Listener>>> = Rc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().retain(|l| l.id != id);
            }
        })
    }

    fn request_animation_frame(&self, callback: Box<dyn FnOnce()>) {
        self.frames.borrow_mut().push(callback);
    }

    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        if let Err(err) = self.spawner.spawn_local(task) {
            log::error!("fixture rejected task: {err}");
        }
    }
}

// =============================================================
// Selectors
// =============================================================

#[derive(Debug, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, Option<String>)>,
}

impl Compound {
    fn matches(&self, node: &Node) -> bool {
        if self.tag.as_ref().is_some_and(|tag| *tag != node.tag) {
            return false;
        }
        if self.id.as_ref().is_some_and(|id| node.attributes.get("id") != Some(id)) {
            return false;
        }
        if !self.classes.iter().all(|class| node.classes.contains(class)) {
            return false;
        }
        self.attributes.iter().all(|(name, expected)| match (node.attributes.get(name), expected) {
            (Some(actual), Some(expected)) => actual == expected,
            (Some(_), None) => true,
            (None, _) => false,
        })
    }
}

const MARKERS: [char; 3] = ['.', '#', '['];

fn parse_selector(selector: &str) -> Vec<Compound> {
    selector.split(',').map(parse_compound).collect()
}

fn parse_compound(raw: &str) -> Compound {
    let mut compound = Compound::default();
    let mut rest = raw.trim();

    let tag_len = rest.find(MARKERS).unwrap_or(rest.len());
    if tag_len > 0 {
        compound.tag = Some(rest[..tag_len].to_ascii_lowercase());
    }
    rest = &rest[tag_len..];

    while let Some(marker) = rest.chars().next() {
        rest = &rest[marker.len_utf8()..];
        if marker == '[' {
            let end = rest.find(']').unwrap_or(rest.len());
            let inner = &rest[..end];
            rest = rest.get(end + 1..).unwrap_or("");
            let attribute = match inner.split_once('=') {
                Some((name, value)) => (name.trim().to_owned(), Some(value.trim().trim_matches(|c| c == '"' || c == '\'').to_owned())),
                None => (inner.trim().to_owned(), None),
            };
            compound.attributes.push(attribute);
        } else {
            let end = rest.find(MARKERS).unwrap_or(rest.len());
            let ident = rest[..end].to_owned();
            rest = &rest[end..];
            if marker == '#' {
                compound.id = Some(ident);
            } else {
                compound.classes.push(ident);
            }
        }
    }
    compound
}

// =============================================================
// Capabilities
// =============================================================

/// Storage that fails every operation, like `localStorage` in a sandboxed
/// iframe.
#[derive(Debug, Default)]
pub struct BrokenStorage;

impl Storage for BrokenStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("access denied".to_owned()))
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Rejected { key: key.to_owned(), reason: "access denied".to_owned() })
    }
}

/// Transport recording every request.
///
/// With a canned reply every request resolves immediately; otherwise each
/// request stays pending until [`MockTransport::resolve_next`].
#[derive(Default)]
pub struct MockTransport {
    requests: RefCell<Vec<(String, String)>>,
    reply: Option<Result<Response, TransportError>>,
    waiting: RefCell<VecDeque<oneshot::Sender<Result<Response, TransportError>>>>,
}

impl MockTransport {
    pub fn replying(reply: Result<Response, TransportError>) -> Rc<Self> {
        Rc::new(Self { reply: Some(reply), ..Self::default() })
    }

    pub fn deferred() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// `(url, body)` of every request so far.
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.borrow().clone()
    }

    /// Complete the oldest pending request; `false` if none was waiting.
    pub fn resolve_next(&self, reply: Result<Response, TransportError>) -> bool {
        match self.waiting.borrow_mut().pop_front() {
            Some(sender) => sender.send(reply).is_ok(),
            None => false,
        }
    }
}

impl Transport for MockTransport {
    fn post_form(&self, url: &str, body: String) -> LocalBoxFuture<'static, Result<Response, TransportError>> {
        self.requests.borrow_mut().push((url.to_owned(), body));
        if let Some(reply) = self.reply.clone() {
            return Box::pin(futures::future::ready(reply));
        }
        let (sender, receiver) = oneshot::channel();
        self.waiting.borrow_mut().push_back(sender);
        Box::pin(async move {
            receiver
                .await
                .unwrap_or_else(|_| Err(TransportError::Network("request dropped".to_owned())))
        })
    }
}
