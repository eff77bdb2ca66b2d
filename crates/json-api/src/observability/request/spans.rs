//! Route labels for spans and metrics.

use uuid::Uuid;

/// Path with UUID segments collapsed, so label cardinality stays bounded.
pub(super) fn route_label(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_uuid_segments() {
        let uuid = Uuid::now_v7();

        assert_eq!(
            route_label(&format!("/cart/items/{uuid}")),
            "/cart/items/{uuid}"
        );
        assert_eq!(
            route_label(&format!("/orders/{uuid}/status")),
            "/orders/{uuid}/status"
        );
    }

    #[test]
    fn keeps_static_paths() {
        assert_eq!(route_label("/"), "/");
        assert_eq!(route_label("/products"), "/products");
    }
}
