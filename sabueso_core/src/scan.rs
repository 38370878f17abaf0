use crate::object::{MISSING_MARKER, PropertyIterable, PropertyValue, RefSlot, nicify_name};
use crate::path::full_path;
use crate::resolve::ResolveRef;
use crate::scene::SceneDoc;
use crate::uid32::NodeID;

/// One detected anomaly. Transient: it exists only long enough to be
/// formatted and handed to a sink, and is never persisted or aggregated here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// A component slot whose identity resolves to nothing.
    MissingComponent {
        context: String,
        node: NodeID,
        path: String,
    },
    /// An object-reference property whose target is gone but whose slot still
    /// carries evidence that a target was once assigned.
    MissingReference {
        context: String,
        node: NodeID,
        path: String,
        component: String,
        property: String,
    },
}

impl Finding {
    pub fn context(&self) -> &str {
        match self {
            Finding::MissingComponent { context, .. } => context,
            Finding::MissingReference { context, .. } => context,
        }
    }

    /// The originating object, so consoles can offer navigation.
    pub fn node(&self) -> NodeID {
        match self {
            Finding::MissingComponent { node, .. } => *node,
            Finding::MissingReference { node, .. } => *node,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Finding::MissingComponent { path, .. } => path,
            Finding::MissingReference { path, .. } => path,
        }
    }
}

/// Classification rule for one reference slot.
///
/// A slot is broken when its resolved value is absent even though the slot
/// carries evidence of a previous assignment: a non-nil raw id, or a `repr`
/// beginning with the `Missing` prefix (writers that collapse the id keep the
/// display form around). A slot whose target still resolves is
/// never broken, and a nil id with no marker was simply never assigned.
/// Slots without a `repr` fall back to the raw-id check alone.
pub fn is_broken(slot: &RefSlot, resolver: &impl ResolveRef) -> bool {
    if slot.target.is_nil() {
        return slot
            .repr
            .as_deref()
            .is_some_and(|r| r.starts_with(MISSING_MARKER));
    }
    !resolver.is_live(slot.target)
}

/// Walk `roots` in order and lazily produce one [`Finding`] per anomaly, in
/// traversal order: per object, per component slot, per property (nested
/// included, declaration order). A missing component slot yields a single
/// component-level finding and its properties are never iterated. An empty
/// root set produces an empty sequence. Nothing is mutated.
pub fn scan<'a, R, I>(
    doc: &'a SceneDoc,
    resolver: &'a R,
    context: &str,
    roots: I,
) -> impl Iterator<Item = Finding> + 'a
where
    R: ResolveRef,
    I: IntoIterator<Item = NodeID>,
    I::IntoIter: 'a,
{
    let context = context.to_string();
    roots
        .into_iter()
        .flat_map(move |id| scan_object(doc, resolver, context.clone(), id))
}

fn scan_object<'a, R: ResolveRef>(
    doc: &'a SceneDoc,
    resolver: &'a R,
    context: String,
    id: NodeID,
) -> Box<dyn Iterator<Item = Finding> + 'a> {
    let Some(object) = doc.get(id) else {
        // A root id that is not in the document: nothing to scan.
        return Box::new(std::iter::empty());
    };

    let path = full_path(doc, id);

    Box::new(object.components.iter().flat_map(move |slot| {
        match slot.component() {
            None => {
                let finding = Finding::MissingComponent {
                    context: context.clone(),
                    node: id,
                    path: path.clone(),
                };
                Box::new(std::iter::once(finding)) as Box<dyn Iterator<Item = Finding> + 'a>
            }
            Some(component) => {
                let context = context.clone();
                let path = path.clone();
                let ty = component.ty.clone();
                Box::new(
                    component
                        .iter_properties(true)
                        .filter_map(move |entry| match entry.value {
                            PropertyValue::Ref(slot) if is_broken(slot, resolver) => {
                                Some(Finding::MissingReference {
                                    context: context.clone(),
                                    node: id,
                                    path: path.clone(),
                                    component: ty.clone(),
                                    property: nicify_name(&entry.name),
                                })
                            }
                            _ => None,
                        }),
                )
            }
        }
    }))
}
