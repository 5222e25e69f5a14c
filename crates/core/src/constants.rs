/// Pivot currency used to bridge pairs with no direct rate.
pub const PIVOT_CURRENCY: &str = "CAD";

/// Decimal precision for valuation calculations
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Name of the derived group covering every account the user owns.
pub const NETWORTH_GROUP: &str = "networth";

/// Name of the derived group covering every account minus the ignore-list.
pub const TOTAL_GROUP: &str = "total";
