//! Runtime CPU feature probe, used once per context to pick a fill strategy

use std::fmt;

bitflags::bitflags! {
    /// Set of instruction set extensions available on the host
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct CpuFeatures: u32 {
        const SSE2 = 1 << 0;
        const SSSE3 = 1 << 1;
        const SSE41 = 1 << 2;
        const AVX = 1 << 3;
        const AVX2 = 1 << 4;
        const FMA = 1 << 5;
        const NEON = 1 << 6;
    }
}

impl CpuFeatures {
    /// Probe the running CPU
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    pub fn detect() -> Self {
        let mut features = CpuFeatures::empty();
        let probes = [
            (is_x86_feature_detected!("sse2"), CpuFeatures::SSE2),
            (is_x86_feature_detected!("ssse3"), CpuFeatures::SSSE3),
            (is_x86_feature_detected!("sse4.1"), CpuFeatures::SSE41),
            (is_x86_feature_detected!("avx"), CpuFeatures::AVX),
            (is_x86_feature_detected!("avx2"), CpuFeatures::AVX2),
            (is_x86_feature_detected!("fma"), CpuFeatures::FMA),
        ];
        for (present, feature) in probes {
            if present {
                features |= feature;
            }
        }
        features
    }

    /// Probe the running CPU
    #[cfg(target_arch = "aarch64")]
    pub fn detect() -> Self {
        if std::arch::is_aarch64_feature_detected!("neon") {
            CpuFeatures::NEON
        } else {
            CpuFeatures::empty()
        }
    }

    /// Probe the running CPU
    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
    pub fn detect() -> Self {
        CpuFeatures::empty()
    }
}

impl fmt::Display for CpuFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        for (i, (name, _)) in self.iter_names().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", name.to_ascii_lowercase())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_operations() {
        let f = CpuFeatures::SSE2 | CpuFeatures::AVX2;
        assert!(f.contains(CpuFeatures::SSE2));
        assert!(!f.contains(CpuFeatures::AVX2 | CpuFeatures::FMA));
        assert!(f.intersects(CpuFeatures::AVX2 | CpuFeatures::FMA));
        assert!(!f.intersects(CpuFeatures::NEON));
        assert!(CpuFeatures::empty().is_empty());
    }

    #[test]
    fn display_lists_names() {
        assert_eq!(CpuFeatures::empty().to_string(), "none");
        assert_eq!((CpuFeatures::SSE41 | CpuFeatures::SSE2).to_string(), "sse2 sse41");
    }

    #[test]
    #[cfg(target_arch = "x86_64")]
    fn x86_64_always_has_sse2() {
        assert!(CpuFeatures::detect().contains(CpuFeatures::SSE2));
    }
}
