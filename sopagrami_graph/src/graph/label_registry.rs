use crate::labels::{Label, LabelTable, VertexId};

#[derive(Clone, Debug)]
pub(crate) struct LabelRegistry {
    /// Interned vertex label tokens
    table: LabelTable,
    /// Label of every vertex, indexed by vertex id
    vlabels: Vec<Label>,
    /// Maps each vertex label to its vertices in ascending order
    by_label: Vec<Vec<VertexId>>,
}

impl LabelRegistry {
    #[must_use]
    pub(crate) fn build(table: LabelTable, vlabels: Vec<Label>) -> Self {
        let by_label = Self::build_label_index(table.len(), &vlabels);
        Self {
            table,
            vlabels,
            by_label,
        }
    }

    fn build_label_index(label_count: usize, vlabels: &[Label]) -> Vec<Vec<VertexId>> {
        let mut by_label: Vec<Vec<VertexId>> = vec![Vec::new(); label_count];
        for (v, &label) in (0..).zip(vlabels) {
            if let Some(vertices) = by_label.get_mut(label as usize) {
                vertices.push(v);
            }
        }
        by_label
    }

    #[must_use]
    pub(crate) const fn len(&self) -> usize {
        self.vlabels.len()
    }

    #[must_use]
    pub(crate) fn label(&self, v: VertexId) -> Label {
        self.vlabels[v as usize]
    }

    #[must_use]
    pub(crate) fn vlabels(&self) -> &[Label] {
        &self.vlabels
    }

    #[must_use]
    pub(crate) fn vertices_with_label(&self, label: Label) -> &[VertexId] {
        self.by_label
            .get(label as usize)
            .map_or(&[], std::vec::Vec::as_slice)
    }

    #[must_use]
    pub(crate) const fn table(&self) -> &LabelTable {
        &self.table
    }
}
