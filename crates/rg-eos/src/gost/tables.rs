//! Coefficient tables of GOST 30319.3-2015 and ISO 20765-1:2005.
//!
//! Component characteristics (table A.1), binary interaction parameters
//! (table A.2), equation terms (table A.3), ideal-gas heat capacity terms
//! (table A.4) and the critical data used for pseudo-critical parameters
//! (table A.5).

use crate::gas::GasKind;
use rg_core::numeric::Real;

/// Per-component characteristics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Characteristics {
    pub gas: GasKind,
    /// Molar mass [kg/kmol].
    pub molar_mass: Real,
    /// Energy parameter `E`.
    pub energy: Real,
    /// Size parameter `K`.
    pub size: Real,
    /// Orientation parameter `G`.
    pub orientation: Real,
    /// Quadrupole parameter `Q`.
    pub quadrupole: Real,
    /// High-temperature parameter `F`.
    pub high_temperature: Real,
    /// Dipole parameter `S`.
    pub dipole: Real,
    /// Association parameter `W`.
    pub association: Real,
}

#[allow(clippy::too_many_arguments)]
const fn characteristics(
    gas: GasKind,
    molar_mass: Real,
    energy: Real,
    size: Real,
    orientation: Real,
    quadrupole: Real,
    high_temperature: Real,
    dipole: Real,
    association: Real,
) -> Characteristics {
    Characteristics {
        gas,
        molar_mass,
        energy,
        size,
        orientation,
        quadrupole,
        high_temperature,
        dipole,
        association,
    }
}

/// The twelve components of the GOST correlation.
static GOST_COMPONENTS: [Characteristics; 12] = [
    characteristics(GasKind::Methane, 16.043, 151.3183, 0.4619255, 0.0, 0.0, 0.0, 0.0, 0.0),
    characteristics(GasKind::Ethane, 30.07, 244.1667, 0.5279209, 0.0793, 0.0, 0.0, 0.0, 0.0),
    characteristics(GasKind::Propane, 44.097, 298.1183, 0.583749, 0.141239, 0.0, 0.0, 0.0, 0.0),
    characteristics(GasKind::IsoButane, 58.123, 324.0689, 0.6406937, 0.256692, 0.0, 0.0, 0.0, 0.0),
    characteristics(GasKind::NButane, 58.123, 337.6389, 0.6341423, 0.281835, 0.0, 0.0, 0.0, 0.0),
    characteristics(GasKind::IsoPentane, 72.15, 365.5999, 0.6738577, 0.332267, 0.0, 0.0, 0.0, 0.0),
    characteristics(GasKind::NPentane, 72.15, 370.6823, 0.6798307, 0.366911, 0.0, 0.0, 0.0, 0.0),
    characteristics(GasKind::Hexane, 86.177, 402.636293, 0.7175118, 0.289731, 0.0, 0.0, 0.0, 0.0),
    characteristics(GasKind::Nitrogen, 28.0135, 99.73778, 0.4479153, 0.027815, 0.0, 0.0, 0.0, 0.0),
    characteristics(GasKind::CarbonDioxide, 44.01, 241.9606, 0.4557489, 0.189065, 0.69, 0.0, 0.0, 0.0),
    characteristics(GasKind::Helium, 4.0026, 2.610111, 0.3589888, 0.0, 0.0, 0.0, 0.0, 0.0),
    characteristics(GasKind::Hydrogen, 2.0159, 26.95794, 0.3514916, 0.034369, 0.0, 0.0, 0.0, 0.0),
];

/// Components added by ISO 20765.
static ISO_COMPONENTS: [Characteristics; 9] = [
    characteristics(GasKind::Heptane, 100.204, 427.72263, 0.7525189, 0.337542, 0.0, 0.0, 0.0, 0.0),
    characteristics(GasKind::Octane, 114.231, 450.32502, 0.784955, 0.383381, 0.0, 0.0, 0.0, 0.0),
    characteristics(GasKind::Nonane, 128.258, 470.84089, 0.8152731, 0.427354, 0.0, 0.0, 0.0, 0.0),
    characteristics(GasKind::Decane, 142.285, 489.55837, 0.8437826, 0.469659, 0.0, 0.0, 0.0, 0.0),
    characteristics(GasKind::CarbonMonoxide, 28.01, 105.5348, 0.4533894, 0.038953, 0.0, 0.0, 0.0, 0.0),
    characteristics(GasKind::Water, 18.0153, 514.0156, 0.3825868, 0.3325, 1.06775, 0.0, 1.5822, 1.0),
    characteristics(GasKind::Oxygen, 31.9988, 122.7667, 0.4186954, 0.021, 0.0, 0.0, 0.0, 0.0),
    characteristics(GasKind::HydrogenSulfide, 34.082, 296.355, 0.4618263, 0.0885, 0.633276, 0.0, 0.39, 0.0),
    characteristics(GasKind::Argon, 39.948, 119.6299, 0.4216551, 0.0, 0.0, 0.0, 0.0, 0.0),
];

/// Characteristics of `gas`, or `None` when the correlation does not cover it.
pub fn characteristics_of(gas: GasKind, iso: bool) -> Option<&'static Characteristics> {
    let extra: &[Characteristics] = if iso { &ISO_COMPONENTS } else { &[] };
    GOST_COMPONENTS.iter().chain(extra).find(|c| c.gas == gas)
}

/// Number of components covered in the given mode.
pub fn component_count(iso: bool) -> usize {
    GOST_COMPONENTS.len() + if iso { ISO_COMPONENTS.len() } else { 0 }
}

/// Binary interaction parameters `E`, `V`, `K`, `G` of a component pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryParameters {
    pub energy: Real,
    pub volume: Real,
    pub size: Real,
    pub orientation: Real,
}

impl BinaryParameters {
    /// Used for every pair absent from the tables.
    pub const NEUTRAL: BinaryParameters = BinaryParameters {
        energy: 1.0,
        volume: 1.0,
        size: 1.0,
        orientation: 1.0,
    };
}

const fn binary(
    i: GasKind,
    j: GasKind,
    energy: Real,
    volume: Real,
    size: Real,
    orientation: Real,
) -> (GasKind, GasKind, BinaryParameters) {
    (
        i,
        j,
        BinaryParameters {
            energy,
            volume,
            size,
            orientation,
        },
    )
}

static GOST_BINARY: [(GasKind, GasKind, BinaryParameters); 35] = [
    binary(GasKind::Methane, GasKind::Propane, 0.994635, 0.990877, 1.007619, 1.0),
    binary(GasKind::Methane, GasKind::IsoButane, 1.01953, 1.0, 1.0, 1.0),
    binary(GasKind::Methane, GasKind::NButane, 0.989844, 0.992291, 0.997596, 1.0),
    binary(GasKind::Methane, GasKind::IsoPentane, 1.00235, 1.0, 1.0, 1.0),
    binary(GasKind::Methane, GasKind::NPentane, 0.999268, 1.00367, 1.002529, 1.0),
    binary(GasKind::Methane, GasKind::Hexane, 1.107274, 1.302576, 0.982962, 1.0),
    binary(GasKind::Methane, GasKind::Nitrogen, 0.97164, 0.886106, 1.00363, 1.0),
    binary(GasKind::Methane, GasKind::CarbonDioxide, 0.960644, 0.963827, 0.995933, 0.807653),
    binary(GasKind::Methane, GasKind::Hydrogen, 1.17052, 1.15639, 1.02326, 1.95731),
    binary(GasKind::Ethane, GasKind::Propane, 1.02256, 1.065173, 0.986893, 1.0),
    binary(GasKind::Ethane, GasKind::IsoButane, 1.0, 1.25, 1.0, 1.0),
    binary(GasKind::Ethane, GasKind::NButane, 1.01306, 1.25, 1.0, 1.0),
    binary(GasKind::Ethane, GasKind::IsoPentane, 1.0, 1.25, 1.0, 1.0),
    binary(GasKind::Ethane, GasKind::NPentane, 1.00532, 1.25, 1.0, 1.0),
    binary(GasKind::Ethane, GasKind::Nitrogen, 0.97012, 0.816431, 1.00796, 1.0),
    binary(GasKind::Ethane, GasKind::CarbonDioxide, 0.925053, 0.96987, 1.00851, 0.370296),
    binary(GasKind::Ethane, GasKind::Hydrogen, 1.16446, 1.61666, 1.02034, 1.0),
    binary(GasKind::Propane, GasKind::NButane, 1.0049, 1.0, 1.0, 1.0),
    binary(GasKind::Propane, GasKind::Nitrogen, 0.945939, 0.915502, 1.0, 1.0),
    binary(GasKind::Propane, GasKind::CarbonDioxide, 0.960237, 1.0, 1.0, 1.0),
    binary(GasKind::Propane, GasKind::Hydrogen, 1.034787, 1.0, 1.0, 1.0),
    binary(GasKind::IsoButane, GasKind::Nitrogen, 0.946914, 1.0, 1.0, 1.0),
    binary(GasKind::IsoButane, GasKind::CarbonDioxide, 0.906849, 1.0, 1.0, 1.0),
    binary(GasKind::IsoButane, GasKind::Hydrogen, 1.3, 1.0, 1.0, 1.0),
    binary(GasKind::NButane, GasKind::Nitrogen, 0.973384, 0.993556, 1.0, 1.0),
    binary(GasKind::NButane, GasKind::CarbonDioxide, 0.897362, 1.0, 1.0, 1.0),
    binary(GasKind::NButane, GasKind::Hydrogen, 1.3, 1.0, 1.0, 1.0),
    binary(GasKind::IsoPentane, GasKind::Nitrogen, 0.95934, 1.0, 1.0, 1.0),
    binary(GasKind::IsoPentane, GasKind::CarbonDioxide, 0.726255, 1.0, 1.0, 1.0),
    binary(GasKind::NPentane, GasKind::Nitrogen, 0.94552, 1.0, 1.0, 1.0),
    binary(GasKind::NPentane, GasKind::CarbonDioxide, 0.859764, 1.0, 1.0, 1.0),
    binary(GasKind::Hexane, GasKind::CarbonDioxide, 0.855134, 1.066638, 0.910183, 1.0),
    binary(GasKind::Nitrogen, GasKind::CarbonDioxide, 1.02274, 0.835058, 0.982361, 0.982746),
    binary(GasKind::Nitrogen, GasKind::Hydrogen, 1.08632, 0.408838, 1.03227, 1.0),
    binary(GasKind::CarbonDioxide, GasKind::Hydrogen, 1.28179, 1.0, 1.0, 1.0),
];

static ISO_BINARY: [(GasKind, GasKind, BinaryParameters); 26] = [
    binary(GasKind::Methane, GasKind::Heptane, 0.88088, 1.191904, 0.983565, 1.0),
    binary(GasKind::Methane, GasKind::Octane, 0.880973, 1.205769, 0.982707, 1.0),
    binary(GasKind::Methane, GasKind::Nonane, 0.881067, 1.219634, 0.981849, 1.0),
    binary(GasKind::Methane, GasKind::Decane, 0.881161, 1.233498, 0.980991, 1.0),
    binary(GasKind::Methane, GasKind::CarbonMonoxide, 0.990126, 1.0, 1.0, 1.0),
    binary(GasKind::Methane, GasKind::Water, 0.708218, 1.0, 1.0, 1.0),
    binary(GasKind::Methane, GasKind::HydrogenSulfide, 0.931484, 0.736833, 1.00008, 1.0),
    binary(GasKind::Ethane, GasKind::Water, 0.693168, 1.0, 1.0, 1.0),
    binary(GasKind::Ethane, GasKind::HydrogenSulfide, 0.946871, 0.971926, 0.999969, 1.0),
    binary(GasKind::Nitrogen, GasKind::Oxygen, 1.021, 1.0, 1.0, 1.0),
    binary(GasKind::Nitrogen, GasKind::CarbonMonoxide, 1.00571, 1.0, 1.0, 1.0),
    binary(GasKind::Nitrogen, GasKind::Water, 0.746954, 1.0, 1.0, 1.0),
    binary(GasKind::Nitrogen, GasKind::HydrogenSulfide, 0.902271, 0.993476, 0.942596, 1.0),
    binary(GasKind::CarbonDioxide, GasKind::Heptane, 0.831229, 1.077634, 0.895362, 1.0),
    binary(GasKind::CarbonDioxide, GasKind::Octane, 0.80831, 1.088178, 0.881152, 1.0),
    binary(GasKind::CarbonDioxide, GasKind::Nonane, 0.786323, 1.098291, 0.86752, 1.0),
    binary(GasKind::CarbonDioxide, GasKind::Decane, 0.765171, 1.108021, 0.854406, 1.0),
    binary(GasKind::CarbonDioxide, GasKind::CarbonMonoxide, 1.5, 0.9, 1.0, 1.0),
    binary(GasKind::CarbonDioxide, GasKind::Water, 0.849408, 1.0, 1.0, 1.67309),
    binary(GasKind::CarbonDioxide, GasKind::HydrogenSulfide, 0.955052, 1.04529, 1.00779, 1.0),
    binary(GasKind::Hexane, GasKind::HydrogenSulfide, 1.008692, 1.028973, 0.96813, 1.0),
    binary(GasKind::Heptane, GasKind::HydrogenSulfide, 1.010126, 1.033754, 0.96287, 1.0),
    binary(GasKind::Octane, GasKind::HydrogenSulfide, 1.011501, 1.038338, 0.957828, 1.0),
    binary(GasKind::Nonane, GasKind::HydrogenSulfide, 1.012821, 1.042735, 0.952441, 1.0),
    binary(GasKind::Decane, GasKind::HydrogenSulfide, 1.014089, 1.046966, 0.948338, 1.0),
    binary(GasKind::Hydrogen, GasKind::CarbonMonoxide, 1.1, 1.0, 1.0, 1.0),
];

/// Symmetric lookup; unlisted pairs (and `i == j`) get
/// [`BinaryParameters::NEUTRAL`].
pub fn binary_parameters(i: GasKind, j: GasKind) -> BinaryParameters {
    GOST_BINARY
        .iter()
        .chain(ISO_BINARY.iter())
        .find(|(a, b, _)| (*a == i && *b == j) || (*a == j && *b == i))
        .map(|(_, _, params)| *params)
        .unwrap_or(BinaryParameters::NEUTRAL)
}

/// One row of the equation's term table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    pub a: Real,
    pub b: Real,
    pub c: Real,
    pub k: Real,
    pub u: Real,
    pub g: Real,
    pub q: Real,
    pub f: Real,
    pub s: Real,
    pub w: Real,
}

#[allow(clippy::too_many_arguments)]
const fn term(
    a: Real,
    b: Real,
    c: Real,
    k: Real,
    u: Real,
    g: Real,
    q: Real,
    f: Real,
    s: Real,
    w: Real,
) -> Term {
    Term {
        a,
        b,
        c,
        k,
        u,
        g,
        q,
        f,
        s,
        w,
    }
}

/// Rows 1..=18 carry the second virial coefficient.
pub const VIRIAL_TERMS: usize = 18;

pub static TERMS: [Term; 58] = [
    term(0.1538326, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    term(1.341953, 1.0, 0.0, 0.0, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0),
    term(-2.998583, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    term(-0.04831228, 1.0, 0.0, 0.0, 3.5, 0.0, 0.0, 0.0, 0.0, 0.0),
    term(0.3757965, 1.0, 0.0, 0.0, -0.5, 1.0, 0.0, 0.0, 0.0, 0.0),
    term(-1.589575, 1.0, 0.0, 0.0, 4.5, 1.0, 0.0, 0.0, 0.0, 0.0),
    term(-0.05358847, 1.0, 0.0, 0.0, 0.5, 0.0, 1.0, 0.0, 0.0, 0.0),
    term(0.88659463, 1.0, 0.0, 0.0, 7.5, 0.0, 0.0, 0.0, 1.0, 0.0),
    term(-0.71023704, 1.0, 0.0, 0.0, 9.5, 0.0, 0.0, 0.0, 1.0, 0.0),
    term(-1.471722, 1.0, 0.0, 0.0, 6.0, 0.0, 0.0, 0.0, 0.0, 1.0),
    term(1.32185035, 1.0, 0.0, 0.0, 12.0, 0.0, 0.0, 0.0, 0.0, 1.0),
    term(-0.78665925, 1.0, 0.0, 0.0, 12.5, 0.0, 0.0, 0.0, 0.0, 1.0),
    term(2.29129e-09, 1.0, 1.0, 3.0, -6.0, 0.0, 0.0, 1.0, 0.0, 0.0),
    term(0.1576724, 1.0, 1.0, 2.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    term(-0.4363864, 1.0, 1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    term(-0.04408159, 1.0, 1.0, 2.0, 2.0, 0.0, 1.0, 0.0, 0.0, 0.0),
    term(-0.003433888, 1.0, 1.0, 4.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    term(0.03205905, 1.0, 1.0, 4.0, 11.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    term(0.02487355, 2.0, 0.0, 0.0, -0.5, 0.0, 0.0, 0.0, 0.0, 0.0),
    term(0.07332279, 2.0, 0.0, 0.0, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0),
    term(-0.001600573, 2.0, 1.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    term(0.6424706, 2.0, 1.0, 2.0, 4.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    term(-0.4162601, 2.0, 1.0, 2.0, 6.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    term(-0.06689957, 2.0, 1.0, 4.0, 21.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    term(0.2791795, 2.0, 1.0, 4.0, 23.0, 1.0, 0.0, 0.0, 0.0, 0.0),
    term(-0.6966051, 2.0, 1.0, 4.0, 22.0, 0.0, 1.0, 0.0, 0.0, 0.0),
    term(-0.002860589, 2.0, 1.0, 4.0, -1.0, 0.0, 0.0, 1.0, 0.0, 0.0),
    term(-0.008098836, 3.0, 0.0, 0.0, -0.5, 0.0, 1.0, 0.0, 0.0, 0.0),
    term(3.150547, 3.0, 1.0, 1.0, 7.0, 1.0, 0.0, 0.0, 0.0, 0.0),
    term(0.007224479, 3.0, 1.0, 1.0, -1.0, 0.0, 0.0, 1.0, 0.0, 0.0),
    term(-0.7057529, 3.0, 1.0, 2.0, 6.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    term(0.5349792, 3.0, 1.0, 2.0, 4.0, 1.0, 0.0, 0.0, 0.0, 0.0),
    term(-0.07931491, 3.0, 1.0, 3.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0),
    term(-1.418465, 3.0, 1.0, 3.0, 9.0, 1.0, 0.0, 0.0, 0.0, 0.0),
    term(-5.99905e-17, 3.0, 1.0, 4.0, -13.0, 0.0, 0.0, 1.0, 0.0, 0.0),
    term(0.1058402, 3.0, 1.0, 4.0, 21.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    term(0.03431729, 3.0, 1.0, 4.0, 8.0, 0.0, 1.0, 0.0, 0.0, 0.0),
    term(-0.007022847, 4.0, 0.0, 0.0, -0.5, 0.0, 0.0, 0.0, 0.0, 0.0),
    term(0.02495587, 4.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    term(0.04296818, 4.0, 1.0, 2.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    term(0.7465453, 4.0, 1.0, 2.0, 7.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    term(-0.2919613, 4.0, 1.0, 2.0, 9.0, 0.0, 1.0, 0.0, 0.0, 0.0),
    term(7.294616, 4.0, 1.0, 4.0, 22.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    term(-9.936757, 4.0, 1.0, 4.0, 23.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    term(-0.005399808, 5.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    term(-0.2432567, 5.0, 1.0, 2.0, 9.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    term(0.04987016, 5.0, 1.0, 2.0, 3.0, 0.0, 1.0, 0.0, 0.0, 0.0),
    term(0.003733797, 5.0, 1.0, 4.0, 8.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    term(1.874951, 5.0, 1.0, 4.0, 23.0, 0.0, 1.0, 0.0, 0.0, 0.0),
    term(0.002168144, 6.0, 0.0, 0.0, 1.5, 0.0, 0.0, 0.0, 0.0, 0.0),
    term(-0.6587164, 6.0, 1.0, 2.0, 5.0, 1.0, 0.0, 0.0, 0.0, 0.0),
    term(0.000205518, 7.0, 0.0, 0.0, -0.5, 0.0, 1.0, 0.0, 0.0, 0.0),
    term(0.009776195, 7.0, 1.0, 2.0, 4.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    term(-0.02048708, 8.0, 1.0, 1.0, 7.0, 1.0, 0.0, 0.0, 0.0, 0.0),
    term(0.01557322, 8.0, 1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    term(0.006862415, 8.0, 1.0, 2.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0),
    term(-0.001226752, 9.0, 1.0, 2.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    term(0.002850908, 9.0, 1.0, 2.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0),
];

/// Ideal-gas terms: `a1`, `a2` of the reduced Helmholtz energy and
/// `B..J` of the Planck-Einstein heat capacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdealGasTerms {
    pub gas: GasKind,
    pub a1: Real,
    pub a2: Real,
    pub b: Real,
    pub c: Real,
    pub d: Real,
    pub e: Real,
    pub f: Real,
    pub g: Real,
    pub h: Real,
    pub i: Real,
    pub j: Real,
}

const fn ideal_gas(gas: GasKind, t: [Real; 11]) -> IdealGasTerms {
    IdealGasTerms {
        gas,
        a1: t[0],
        a2: t[1],
        b: t[2],
        c: t[3],
        d: t[4],
        e: t[5],
        f: t[6],
        g: t[7],
        h: t[8],
        i: t[9],
        j: t[10],
    }
}

static IDEAL_GAS: [IdealGasTerms; 21] = [
    ideal_gas(GasKind::Methane, [35.53603, -15999.69151, 4.00088, 0.76315, 820.659, 0.0046, 178.41, 8.74432, 1062.82, -4.46921, 1090.53]),
    ideal_gas(GasKind::Ethane, [42.42766, -23639.65301, 4.00263, 4.33939, 559.314, 1.23722, 223.284, 13.1974, 1031.38, -6.01989, 1071.29]),
    ideal_gas(GasKind::Propane, [50.40669, -31236.63551, 4.02939, 6.60569, 479.856, 3.197, 200.893, 19.1921, 955.312, -8.37267, 1027.29]),
    ideal_gas(GasKind::NButane, [42.22997, -38957.80933, 4.33944, 9.44893, 468.27, 6.89406, 183.636, 24.4618, 1914.1, 14.7824, 903.185]),
    ideal_gas(GasKind::IsoButane, [39.9994, -38525.50276, 4.06714, 8.97575, 438.27, 5.25156, 198.018, 25.1423, 1905.02, 16.1388, 893.765]),
    ideal_gas(GasKind::NPentane, [48.37597, -45215.83, 4.0, 8.95043, 178.67, 21.836, 840.538, 33.4032, 1774.25, 0.0, 0.0]),
    ideal_gas(GasKind::IsoPentane, [48.86978, -51198.30946, 4.0, 11.7618, 292.503, 20.1101, 910.237, 33.1688, 1919.37, 0.0, 0.0]),
    ideal_gas(GasKind::Hexane, [52.69477, -52746.83318, 4.0, 11.6977, 182.326, 26.8142, 859.207, 38.6164, 1826.59, 0.0, 0.0]),
    ideal_gas(GasKind::Oxygen, [22.49931, -2318.32269, 3.50146, 1.07558, 2235.71, 1.01334, 1116.69, 0.0, 0.0, 0.0, 0.0]),
    ideal_gas(GasKind::Nitrogen, [23.2653, -2801.72907, 3.50031, 0.13732, 662.738, -0.1466, 680.562, 0.90066, 1740.06, 0.0, 0.0]),
    ideal_gas(GasKind::CarbonDioxide, [26.35604, -4902.17152, 3.50002, 2.04452, 919.306, -1.06044, 865.07, 2.03366, 483.553, 0.01393, 341.109]),
    ideal_gas(GasKind::Helium, [15.74399, -745.375, 2.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    ideal_gas(GasKind::Hydrogen, [18.7728, -5836.9437, 2.47906, 0.95806, 228.734, 0.45444, 326.843, 1.56039, 1651.71, -1.3756, 1671.69]),
    ideal_gas(GasKind::Heptane, [57.77391, -57104.81056, 4.0, 13.7266, 169.789, 30.4707, 836.195, 43.5561, 1760.46, 0.0, 0.0]),
    ideal_gas(GasKind::Octane, [62.95591, -60546.76385, 4.0, 15.6865, 158.922, 33.8029, 815.064, 48.1731, 1693.07, 0.0, 0.0]),
    ideal_gas(GasKind::Nonane, [67.79407, -66600.12837, 4.0, 18.0241, 156.854, 38.1235, 814.882, 53.3415, 1693.79, 0.0, 0.0]),
    ideal_gas(GasKind::Decane, [71.63669, -74131.45483, 4.0, 21.0069, 164.947, 43.4931, 836.264, 58.3657, 1750.24, 0.0, 0.0]),
    ideal_gas(GasKind::CarbonMonoxide, [23.15547, -2635.24412, 3.50055, 1.02865, 1550.45, 0.00493, 704.525, 0.0, 0.0, 0.0, 0.0]),
    ideal_gas(GasKind::Water, [27.27642, -7766.73308, 4.00392, 0.01059, 268.795, 0.98763, 1141.41, 3.06904, 2507.37, 0.0, 0.0]),
    ideal_gas(GasKind::HydrogenSulfide, [27.28069, -6069.03587, 4.0, 3.11942, 1833.63, 1.00243, 847.181, 0.0, 0.0, 0.0, 0.0]),
    ideal_gas(GasKind::Argon, [15.74399, -745.375, 2.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
];

pub fn ideal_gas_terms(gas: GasKind) -> Option<&'static IdealGasTerms> {
    IDEAL_GAS.iter().find(|terms| terms.gas == gas)
}

/// Critical temperature [K], critical density [kg/m³] and acentric factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalData {
    pub gas: GasKind,
    pub tc: Real,
    pub density: Real,
    pub acentric: Real,
}

const fn critical(gas: GasKind, tc: Real, density: Real, acentric: Real) -> CriticalData {
    CriticalData {
        gas,
        tc,
        density,
        acentric,
    }
}

static CRITICAL: [CriticalData; 12] = [
    critical(GasKind::Methane, 190.564, 162.66, 0.064294),
    critical(GasKind::Ethane, 305.32, 206.58, 0.10958),
    critical(GasKind::Propane, 369.825, 220.49, 0.18426),
    critical(GasKind::IsoButane, 407.85, 224.36, 0.16157),
    critical(GasKind::NButane, 425.16, 227.85, 0.2134),
    critical(GasKind::IsoPentane, 460.39, 236.0, 0.26196),
    critical(GasKind::NPentane, 469.65, 232.0, 0.29556),
    critical(GasKind::Hexane, 507.85, 233.6, 0.29965),
    critical(GasKind::Nitrogen, 126.2, 313.1, 0.013592),
    critical(GasKind::CarbonDioxide, 304.2, 468.0, 0.20625),
    critical(GasKind::Helium, 5.19, 69.64, -0.14949),
    critical(GasKind::Hydrogen, 32.938, 31.36, -0.12916),
];

/// Only the GOST components have critical data; the others are left out of
/// the pseudo-critical averages.
pub fn critical_data(gas: GasKind) -> Option<&'static CriticalData> {
    CRITICAL.iter().find(|data| data.gas == gas)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_coverage() {
        assert_eq!(component_count(false), 12);
        assert_eq!(component_count(true), 21);
        assert!(characteristics_of(GasKind::Heptane, false).is_none());
        assert!(characteristics_of(GasKind::Heptane, true).is_some());
        assert!(characteristics_of(GasKind::Benzene, true).is_none());
    }

    #[test]
    fn every_component_has_ideal_gas_terms() {
        for c in GOST_COMPONENTS.iter().chain(ISO_COMPONENTS.iter()) {
            assert!(ideal_gas_terms(c.gas).is_some(), "{}", c.gas);
        }
        for c in GOST_COMPONENTS.iter() {
            assert!(critical_data(c.gas).is_some(), "{}", c.gas);
        }
    }

    #[test]
    fn binary_lookup_is_symmetric() {
        let ab = binary_parameters(GasKind::Methane, GasKind::CarbonDioxide);
        let ba = binary_parameters(GasKind::CarbonDioxide, GasKind::Methane);
        assert_eq!(ab, ba);
        assert_eq!(ab.orientation, 0.807653);
        assert_eq!(
            binary_parameters(GasKind::Water, GasKind::CarbonDioxide).orientation,
            1.67309
        );
    }

    #[test]
    fn unlisted_pair_is_neutral() {
        // methane-ethane has no entry in table A.2
        assert_eq!(
            binary_parameters(GasKind::Methane, GasKind::Ethane),
            BinaryParameters::NEUTRAL
        );
        assert_eq!(
            binary_parameters(GasKind::Helium, GasKind::Helium),
            BinaryParameters::NEUTRAL
        );
    }

    #[test]
    fn term_table_shape() {
        assert_eq!(TERMS.len(), 58);
        assert!(TERMS[..12].iter().all(|t| t.c == 0.0 && t.b == 1.0));
        assert!(TERMS[12..VIRIAL_TERMS].iter().all(|t| t.c == 1.0));
        assert!(TERMS[VIRIAL_TERMS..].iter().all(|t| t.b >= 2.0));
    }
}
