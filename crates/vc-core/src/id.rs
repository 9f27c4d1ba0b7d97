use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for layer ids.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Id of the single raster ink layer.
pub const DRAWING_LAYER: &str = "drawing-layer";

/// Id of the background image layer in the single-image variant.
pub const IMAGE_LAYER: &str = "image-layer";

/// An interned layer identifier. 4 bytes, `Copy`, O(1) `Eq`/`Hash`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(Spur);

impl LayerId {
    /// Intern a string as a LayerId, or return the existing one.
    pub fn intern(s: &str) -> Self {
        LayerId(INTERNER.get_or_intern(s))
    }

    /// The id for `s` if it was ever interned. Never grows the interner.
    pub fn lookup(s: &str) -> Option<Self> {
        INTERNER.get(s).map(LayerId)
    }

    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    pub fn drawing() -> Self {
        Self::intern(DRAWING_LAYER)
    }

    pub fn image() -> Self {
        Self::intern(IMAGE_LAYER)
    }

    /// `<prefix>_<n>`, e.g. `image-layer_3`.
    pub fn numbered(prefix: &str, n: u64) -> Self {
        Self::intern(&format!("{prefix}_{n}"))
    }

    /// The `n` of a [`Self::numbered`] id under `prefix`.
    pub fn number(&self, prefix: &str) -> Option<u64> {
        self.as_str().strip_prefix(prefix)?.strip_prefix('_')?.parse().ok()
    }
}

impl fmt::Debug for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LayerId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LayerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(LayerId::intern(&s))
    }
}
