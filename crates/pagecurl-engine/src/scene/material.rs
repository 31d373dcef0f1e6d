use std::fmt;

/// One externally settable parameter of a loaded material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialParameter {
    pub name: String,
    /// Engine-specific type name (e.g. "vec4", "texture", "sampler").
    pub kind: String,
    /// Array length; `1` for non-array parameters.
    pub count: u32,
    /// Bind group and slot, when the engine exposes them.
    pub slot: Option<(u32, u32)>,
}

impl fmt::Display for MaterialParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((group, binding)) = self.slot {
            write!(f, "@{group}:{binding} ")?;
        }
        write!(f, "{} = {}[{}]", self.name, self.kind, self.count)
    }
}

/// Result of building a material from an opaque payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialInfo {
    pub parameters: Vec<MaterialParameter>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_slot_when_known() {
        let p = MaterialParameter {
            name: "tint".into(),
            kind: "vec4".into(),
            count: 1,
            slot: Some((0, 2)),
        };
        assert_eq!(p.to_string(), "@0:2 tint = vec4[1]");
    }

    #[test]
    fn display_without_slot() {
        let p = MaterialParameter {
            name: "weights".into(),
            kind: "f32".into(),
            count: 8,
            slot: None,
        };
        assert_eq!(p.to_string(), "weights = f32[8]");
    }
}
