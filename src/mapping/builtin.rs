//! Built-in catalog of removed Kubernetes APIs.
//!
//! Each entry matches an `apiVersion:` line followed by its `kind:` line, so a
//! group version shared by several kinds is only rewritten for the kinds that
//! actually moved. Entries take effect at the removal version: the
//! replacement group version is not guaranteed to be served any earlier.

use crate::mapping::types::{MappingCatalog, MappingEntry};

/// A removed API as (deprecated apiVersion, kind, replacement apiVersion, removed in).
struct RemovedApi {
    api_version: &'static str,
    kind: &'static str,
    replacement: &'static str,
    removed_in: &'static str,
}

const fn removed(
    api_version: &'static str,
    kind: &'static str,
    replacement: &'static str,
    removed_in: &'static str,
) -> RemovedApi {
    RemovedApi {
        api_version,
        kind,
        replacement,
        removed_in,
    }
}

static REMOVED_APIS: &[RemovedApi] = &[
    // extensions/v1beta1
    removed("extensions/v1beta1", "Deployment", "apps/v1", "1.16"),
    removed("extensions/v1beta1", "DaemonSet", "apps/v1", "1.16"),
    removed("extensions/v1beta1", "ReplicaSet", "apps/v1", "1.16"),
    removed("extensions/v1beta1", "NetworkPolicy", "networking.k8s.io/v1", "1.16"),
    removed("extensions/v1beta1", "Ingress", "networking.k8s.io/v1", "1.22"),
    // apps/v1beta1, apps/v1beta2
    removed("apps/v1beta1", "Deployment", "apps/v1", "1.16"),
    removed("apps/v1beta1", "StatefulSet", "apps/v1", "1.16"),
    removed("apps/v1beta2", "Deployment", "apps/v1", "1.16"),
    removed("apps/v1beta2", "DaemonSet", "apps/v1", "1.16"),
    removed("apps/v1beta2", "ReplicaSet", "apps/v1", "1.16"),
    removed("apps/v1beta2", "StatefulSet", "apps/v1", "1.16"),
    // networking.k8s.io/v1beta1
    removed("networking.k8s.io/v1beta1", "Ingress", "networking.k8s.io/v1", "1.22"),
    removed("networking.k8s.io/v1beta1", "IngressClass", "networking.k8s.io/v1", "1.22"),
    // rbac.authorization.k8s.io/v1beta1
    removed("rbac.authorization.k8s.io/v1beta1", "ClusterRole", "rbac.authorization.k8s.io/v1", "1.22"),
    removed("rbac.authorization.k8s.io/v1beta1", "ClusterRoleBinding", "rbac.authorization.k8s.io/v1", "1.22"),
    removed("rbac.authorization.k8s.io/v1beta1", "Role", "rbac.authorization.k8s.io/v1", "1.22"),
    removed("rbac.authorization.k8s.io/v1beta1", "RoleBinding", "rbac.authorization.k8s.io/v1", "1.22"),
    // admissionregistration.k8s.io/v1beta1
    removed("admissionregistration.k8s.io/v1beta1", "MutatingWebhookConfiguration", "admissionregistration.k8s.io/v1", "1.22"),
    removed("admissionregistration.k8s.io/v1beta1", "ValidatingWebhookConfiguration", "admissionregistration.k8s.io/v1", "1.22"),
    removed("apiextensions.k8s.io/v1beta1", "CustomResourceDefinition", "apiextensions.k8s.io/v1", "1.22"),
    removed("certificates.k8s.io/v1beta1", "CertificateSigningRequest", "certificates.k8s.io/v1", "1.22"),
    removed("coordination.k8s.io/v1beta1", "Lease", "coordination.k8s.io/v1", "1.22"),
    removed("scheduling.k8s.io/v1beta1", "PriorityClass", "scheduling.k8s.io/v1", "1.22"),
    // storage.k8s.io/v1beta1
    removed("storage.k8s.io/v1beta1", "CSIDriver", "storage.k8s.io/v1", "1.22"),
    removed("storage.k8s.io/v1beta1", "CSINode", "storage.k8s.io/v1", "1.22"),
    removed("storage.k8s.io/v1beta1", "StorageClass", "storage.k8s.io/v1", "1.22"),
    removed("storage.k8s.io/v1beta1", "VolumeAttachment", "storage.k8s.io/v1", "1.22"),
    // removed in 1.25
    removed("batch/v1beta1", "CronJob", "batch/v1", "1.25"),
    removed("discovery.k8s.io/v1beta1", "EndpointSlice", "discovery.k8s.io/v1", "1.25"),
    removed("events.k8s.io/v1beta1", "Event", "events.k8s.io/v1", "1.25"),
    removed("policy/v1beta1", "PodDisruptionBudget", "policy/v1", "1.25"),
    // removed in 1.26
    removed("autoscaling/v2beta1", "HorizontalPodAutoscaler", "autoscaling/v2", "1.26"),
    removed("autoscaling/v2beta2", "HorizontalPodAutoscaler", "autoscaling/v2", "1.26"),
];

fn manifest_header(api_version: &str, kind: &str) -> String {
    format!("apiVersion: {}\nkind: {}\n", api_version, kind)
}

/// Catalog used when no map file is configured.
pub fn builtin_catalog() -> MappingCatalog {
    REMOVED_APIS
        .iter()
        .map(|api| {
            MappingEntry::new(
                manifest_header(api.api_version, api.kind),
                manifest_header(api.replacement, api.kind),
            )
            .removed_in(api.removed_in)
        })
        .collect()
}
