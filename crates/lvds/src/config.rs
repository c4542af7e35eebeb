//! Device configuration resolution
//!
//! The host device descriptor arrives as loosely-typed key/value data. It is
//! resolved into an immutable [`LvdsConfig`] before any resource is touched:
//! a device either gets a fully validated configuration or fails probe, so
//! the power and mode-set paths never see a half-configured state.

use crate::registers;

/// Electrical output variant of the transmitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputMode {
    /// Parallel RGB through the TTL bypass.
    #[default]
    Rgb,
    /// Single-link LVDS on channel 0.
    Lvds,
    /// Dual-link LVDS, even/odd pixels split across both channels.
    DualLvds,
}

impl OutputMode {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "rgb" => Some(Self::Rgb),
            "lvds" => Some(Self::Lvds),
            "duallvds" => Some(Self::DualLvds),
            _ => None,
        }
    }
}

/// LVDS bit-mapping convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataMapping {
    /// JEIDA lane assignment.
    #[default]
    Jeida,
    /// VESA lane assignment.
    Vesa,
}

impl DataMapping {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "jeida" => Some(Self::Jeida),
            "vesa" => Some(Self::Vesa),
            _ => None,
        }
    }

    /// SOC_CON7 field value for this mapping.
    pub fn con7_bits(self) -> u16 {
        match self {
            Self::Jeida => registers::FORMAT_JEIDA,
            Self::Vesa => registers::FORMAT_VESA,
        }
    }
}

/// Pixel data width on the panel link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataWidth {
    /// 6 bits per component.
    Bits18,
    /// 8 bits per component.
    #[default]
    Bits24,
}

impl DataWidth {
    /// SOC_CON7 field value for this width.
    pub fn con7_bits(self) -> u16 {
        match self {
            Self::Bits18 => registers::WIDTH_18BIT,
            Self::Bits24 => registers::WIDTH_24BIT,
        }
    }
}

/// GRF register offsets for one SoC generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GrfOffsets {
    /// GPIO1D iomux register (parallel-RGB pin routing).
    pub gpio1d_iomux: u32,
    /// SOC_CON6 (VOP select).
    pub soc_con6: u32,
    /// SOC_CON7 (output configuration).
    pub soc_con7: u32,
}

/// Supported SoC generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SocVariant {
    /// RK3288.
    Rk3288,
}

impl SocVariant {
    /// Resolve a device-tree compatibility string.
    pub fn from_compatible(compatible: &str) -> Option<Self> {
        match compatible {
            "rockchip,rk3288-lvds" => Some(Self::Rk3288),
            _ => None,
        }
    }

    /// GRF offsets for this generation.
    pub fn grf(self) -> GrfOffsets {
        match self {
            Self::Rk3288 => GrfOffsets {
                gpio1d_iomux: 0x000c,
                soc_con6: 0x025c,
                soc_con7: 0x0260,
            },
        }
    }
}

/// Raw device descriptor fields, as handed over by the host.
///
/// `None` means the key is absent; absent keys fall back to the documented
/// defaults where one exists.
#[derive(Debug, Clone, Copy)]
pub struct DeviceDescriptor<'a> {
    /// SoC compatibility string. Required.
    pub compatible: &'a str,
    /// Whether the descriptor carries a panel reference. A descriptor
    /// without one can never produce a usable output.
    pub has_panel_ref: bool,
    /// Output variant name (`rgb`, `lvds`, `duallvds`). Default: `rgb`.
    pub output: Option<&'a str>,
    /// Bit mapping name (`jeida`, `vesa`). Default: `jeida`.
    pub data_mapping: Option<&'a str>,
    /// Link width in bits (18 or 24). Default: 24.
    pub data_width: Option<u32>,
}

/// Descriptor validation failures. All are fatal at probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Compatibility string matches no supported SoC.
    UnknownCompatible,
    /// The descriptor has no panel reference.
    MissingPanel,
    /// The syscon (GRF) reference is missing; the output configuration
    /// registers would be unreachable.
    MissingSyscon,
    /// Output variant name not one of `rgb`/`lvds`/`duallvds`.
    UnknownOutput,
    /// Mapping name not one of `jeida`/`vesa`.
    UnknownMapping,
    /// Link width other than 18 or 24 bits.
    UnsupportedWidth(u32),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownCompatible => write!(f, "unsupported compatibility string"),
            Self::MissingPanel => write!(f, "descriptor has no panel reference"),
            Self::MissingSyscon => write!(f, "descriptor has no syscon (GRF) reference"),
            Self::UnknownOutput => write!(f, "unknown output variant"),
            Self::UnknownMapping => write!(f, "unknown data mapping"),
            Self::UnsupportedWidth(w) => write!(f, "unsupported data width {w}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Immutable, fully validated device configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LvdsConfig {
    /// Electrical output variant.
    pub output: OutputMode,
    /// LVDS bit-mapping convention.
    pub mapping: DataMapping,
    /// Link data width.
    pub width: DataWidth,
    /// SoC generation (selects GRF offsets).
    pub soc: SocVariant,
}

impl LvdsConfig {
    /// Resolve a descriptor, applying defaults for absent keys and
    /// rejecting unknown values.
    pub fn from_descriptor(desc: &DeviceDescriptor<'_>) -> Result<Self, ConfigError> {
        let soc =
            SocVariant::from_compatible(desc.compatible).ok_or(ConfigError::UnknownCompatible)?;

        let output = match desc.output {
            None => OutputMode::default(),
            Some(name) => OutputMode::from_name(name).ok_or(ConfigError::UnknownOutput)?,
        };

        let mapping = match desc.data_mapping {
            None => DataMapping::default(),
            Some(name) => DataMapping::from_name(name).ok_or(ConfigError::UnknownMapping)?,
        };

        let width = match desc.data_width {
            None => DataWidth::default(),
            Some(24) => DataWidth::Bits24,
            Some(18) => DataWidth::Bits18,
            Some(other) => return Err(ConfigError::UnsupportedWidth(other)),
        };

        Ok(Self {
            output,
            mapping,
            width,
            soc,
        })
    }

    /// Combined SOC_CON7 format field (mapping | width).
    pub fn format_bits(&self) -> u16 {
        self.mapping.con7_bits() | self.width.con7_bits()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn descriptor() -> DeviceDescriptor<'static> {
        DeviceDescriptor {
            compatible: "rockchip,rk3288-lvds",
            has_panel_ref: true,
            output: None,
            data_mapping: None,
            data_width: None,
        }
    }

    #[test]
    fn test_defaults_rgb_jeida_24bit() {
        let config = LvdsConfig::from_descriptor(&descriptor()).unwrap();
        assert_eq!(config.output, OutputMode::Rgb);
        assert_eq!(config.mapping, DataMapping::Jeida);
        assert_eq!(config.width, DataWidth::Bits24);
        assert_eq!(config.soc, SocVariant::Rk3288);
    }

    #[test]
    fn test_dual_lvds_vesa_24() {
        let desc = DeviceDescriptor {
            output: Some("duallvds"),
            data_mapping: Some("vesa"),
            data_width: Some(24),
            ..descriptor()
        };
        let config = LvdsConfig::from_descriptor(&desc).unwrap();
        assert_eq!(config.output, OutputMode::DualLvds);
        assert_eq!(
            config.format_bits(),
            registers::FORMAT_VESA | registers::WIDTH_24BIT
        );
    }

    #[test]
    fn test_format_bits_cover_all_combinations() {
        let cases = [
            (DataMapping::Jeida, DataWidth::Bits24, registers::FORMAT_JEIDA),
            (
                DataMapping::Jeida,
                DataWidth::Bits18,
                registers::FORMAT_JEIDA | registers::WIDTH_18BIT,
            ),
            (DataMapping::Vesa, DataWidth::Bits24, 0),
            (DataMapping::Vesa, DataWidth::Bits18, registers::WIDTH_18BIT),
        ];
        for (mapping, width, expected) in cases {
            let config = LvdsConfig {
                output: OutputMode::Lvds,
                mapping,
                width,
                soc: SocVariant::Rk3288,
            };
            assert_eq!(config.format_bits(), expected, "{mapping:?}/{width:?}");
        }
    }

    #[test]
    fn test_unknown_output_rejected() {
        let desc = DeviceDescriptor {
            output: Some("hdmi"),
            ..descriptor()
        };
        assert_eq!(
            LvdsConfig::from_descriptor(&desc),
            Err(ConfigError::UnknownOutput)
        );
    }

    #[test]
    fn test_unknown_mapping_rejected() {
        let desc = DeviceDescriptor {
            data_mapping: Some("msb"),
            ..descriptor()
        };
        assert_eq!(
            LvdsConfig::from_descriptor(&desc),
            Err(ConfigError::UnknownMapping)
        );
    }

    #[test]
    fn test_unsupported_width_rejected() {
        let desc = DeviceDescriptor {
            data_width: Some(16),
            ..descriptor()
        };
        assert_eq!(
            LvdsConfig::from_descriptor(&desc),
            Err(ConfigError::UnsupportedWidth(16))
        );
    }

    #[test]
    fn test_unknown_compatible_rejected() {
        let desc = DeviceDescriptor {
            compatible: "rockchip,rk3399-lvds",
            ..descriptor()
        };
        assert_eq!(
            LvdsConfig::from_descriptor(&desc),
            Err(ConfigError::UnknownCompatible)
        );
    }

    #[test]
    fn test_rk3288_grf_offsets() {
        let grf = SocVariant::Rk3288.grf();
        assert_eq!(grf.gpio1d_iomux, 0x000c);
        assert_eq!(grf.soc_con6, 0x025c);
        assert_eq!(grf.soc_con7, 0x0260);
    }
}
