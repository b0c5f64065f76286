//! Derivación de nombres cortos para slots de entrada/salida.
//!
//! Función pura y estable: el mismo nombre produce siempre la misma
//! abreviación, así los front-ends pueden mostrarla sin coordinarse.

/// Deriva la abreviación de un nombre de slot.
///
/// - PascalCase: mayúsculas (y dígitos) del nombre (`PropertiesFromLayers`
///   → `PFL`, `Point3d` → `P3`).
/// - snake_case: inicial de cada segmento, en mayúscula (`set_out_line`
///   → `SOL`).
/// - palabra en minúsculas: primera letra en mayúscula (`depth` → `D`).
pub fn derive_short_name(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    if name.contains('_') {
        return name.split('_')
                   .filter_map(|seg| seg.chars().next())
                   .flat_map(|c| c.to_uppercase())
                   .collect();
    }

    let caps: String = name.chars().filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit()).collect();
    if !caps.is_empty() {
        return caps;
    }

    name.chars().take(1).flat_map(|c| c.to_uppercase()).collect()
}
