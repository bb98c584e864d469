//! Method enumeration over a parsed source file.

use excat_settings::Visibility;
use excat_types::ScanResult;
use syn::ext::IdentExt;
use syn::{Attribute, Ident, ImplItem, Item, TraitItem, Type};

/// Record every admitted method in `items` under `module`.
///
/// * free functions belong to the module itself
/// * inherent and trait-impl methods belong to `module::Type`
/// * trait default methods belong to `module::Trait`
/// * inline modules extend the path; `#[cfg(test)]` items are skipped
pub(crate) fn collect_items(
    items: &[Item],
    module: &str,
    level: Visibility,
    out: &mut ScanResult,
) {
    for item in items {
        match item {
            Item::Fn(f) => {
                if is_test_only(&f.attrs) || !admits(level, &f.vis) {
                    continue;
                }
                out.insert(module, &name(&f.sig.ident));
            }
            Item::Impl(imp) => {
                if is_test_only(&imp.attrs) {
                    continue;
                }
                let Some(type_name) = self_type_name(&imp.self_ty) else {
                    continue;
                };
                let class = format!("{module}::{type_name}");
                // Trait methods are as visible as the trait; they carry no `pub`.
                let trait_impl = imp.trait_.is_some();
                for impl_item in &imp.items {
                    if let ImplItem::Fn(method) = impl_item
                        && !is_test_only(&method.attrs)
                        && (trait_impl || admits(level, &method.vis))
                    {
                        out.insert(&class, &name(&method.sig.ident));
                    }
                }
            }
            Item::Trait(tr) => {
                if is_test_only(&tr.attrs) || !admits(level, &tr.vis) {
                    continue;
                }
                let class = format!("{module}::{}", name(&tr.ident));
                for trait_item in &tr.items {
                    if let TraitItem::Fn(method) = trait_item
                        && method.default.is_some()
                    {
                        out.insert(&class, &name(&method.sig.ident));
                    }
                }
            }
            Item::Mod(m) => {
                if is_test_only(&m.attrs) {
                    continue;
                }
                if let Some((_, inner)) = &m.content {
                    let nested = format!("{module}::{}", name(&m.ident));
                    collect_items(inner, &nested, level, out);
                }
            }
            _ => {}
        }
    }
}

fn admits(level: Visibility, vis: &syn::Visibility) -> bool {
    match level {
        Visibility::All => true,
        Visibility::Crate => !matches!(vis, syn::Visibility::Inherited),
        Visibility::Public => matches!(vis, syn::Visibility::Public(_)),
    }
}

/// Last path segment of the implementing type, generics dropped.
fn self_type_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(p) => p.path.segments.last().map(|s| name(&s.ident)),
        Type::Reference(r) => self_type_name(&r.elem),
        Type::Paren(p) => self_type_name(&p.elem),
        Type::Group(g) => self_type_name(&g.elem),
        _ => None,
    }
}

fn name(ident: &Ident) -> String {
    ident.unraw().to_string()
}

/// `#[cfg(test)]` or `#[test]`.
fn is_test_only(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|attr| {
        if attr.path().is_ident("test") {
            return true;
        }
        if !attr.path().is_ident("cfg") {
            return false;
        }
        attr.parse_args::<Ident>().is_ok_and(|ident| ident == "test")
    })
}
