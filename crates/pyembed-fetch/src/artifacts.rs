//! Artifact naming and URL construction

use pyembed_core::{Architecture, Settings};

/// Installer packages every download includes
pub const BASE_PACKAGES: [&str; 2] = ["core.msi", "dev.msi"];

/// Installer package holding the standard library
pub const LIB_PACKAGE: &str = "lib.msi";

/// Suffix inserted before the extension for debug builds
pub const DEBUG_SUFFIX: &str = "_d";

/// Ordered list of installer packages for the given flags
///
/// The base set comes first (`lib.msi` appended when `stdlib`), followed by
/// the debug variant of each base entry when `debug` is set.
pub fn installer_packages(debug: bool, stdlib: bool) -> Vec<String> {
    let mut packages: Vec<String> = BASE_PACKAGES.iter().map(|p| p.to_string()).collect();
    if stdlib {
        packages.push(LIB_PACKAGE.to_string());
    }

    if debug {
        let debug_packages: Vec<String> = packages.iter().map(|p| debug_name(p)).collect();
        packages.extend(debug_packages);
    }

    packages
}

/// Installer packages for `settings`
pub fn packages_for(settings: &Settings) -> Vec<String> {
    installer_packages(settings.debug(), settings.stdlib())
}

/// Debug variant of a file name: `core.msi` becomes `core_d.msi`
pub fn debug_name(name: &str) -> String {
    match name.rfind('.') {
        Some(dot) if dot > 0 => format!("{}{}{}", &name[..dot], DEBUG_SUFFIX, &name[dot..]),
        _ => format!("{}{}", name, DEBUG_SUFFIX),
    }
}

/// URL of an installer package on the mirror
///
/// `{base}/{version}/{arch}/{package}`
pub fn installer_url(base_url: &str, version: &str, arch: Architecture, package: &str) -> String {
    format!(
        "{}/{}/{}/{}",
        base_url.trim_end_matches('/'),
        version,
        arch.url_name(),
        package
    )
}

/// File name of the embeddable runtime bundle
pub fn embed_bundle_name(version: &str, arch: Architecture) -> String {
    format!("python-{}-embed-{}.zip", version, arch.url_name())
}

/// URL of the embeddable runtime bundle on the mirror
///
/// `{base}/{version}/python-{version}-embed-{arch}.zip`
pub fn embed_bundle_url(base_url: &str, version: &str, arch: Architecture) -> String {
    format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        version,
        embed_bundle_name(version, arch)
    )
}
