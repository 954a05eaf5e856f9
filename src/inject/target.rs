//! Injection targets
//!
//! A target type exposes its declared fields by name through
//! [`Injectable`]. Implementations are generated by [`injectable!`]; the
//! generated `set_field` lives in the declaring module and may therefore
//! write private fields.
//!
//! [`injectable!`]: crate::injectable

use super::classify::TargetDescriptor;
use crate::errors::{InjectError, InjectResult};
use crate::observability::Logger;
use crate::tree::ValueNode;

/// A type whose fields can be populated from value-tree nodes by name.
pub trait Injectable: Sized {
    /// Simple type name, used to find the type's default-values document
    fn type_name() -> &'static str;

    /// Declared fields in declaration order
    fn descriptor() -> TargetDescriptor;

    /// No-argument constructor
    fn construct() -> InjectResult<Self>;

    /// Converts `node` and writes it into the field named `field`
    fn set_field(&mut self, field: &str, node: &ValueNode) -> InjectResult<()>;
}

/// Constructs a fresh `T` and writes every node into the field it names.
///
/// Nodes are applied in sequence order, so a later node for the same field
/// overwrites an earlier one. The first failure aborts and the partially
/// populated instance is dropped.
pub fn populate<T: Injectable>(nodes: &[ValueNode]) -> InjectResult<T> {
    let descriptor = T::descriptor();
    let mut target = T::construct()?;

    for node in nodes {
        let field = descriptor.field(node.name()).ok_or_else(|| {
            InjectError::field_not_declared(descriptor.type_name(), node.name())
        })?;

        Logger::trace(
            "FIELD_INJECT",
            &[
                ("classification", field.classification().to_string().as_str()),
                ("field", field.name()),
                ("type", descriptor.type_name()),
            ],
        );

        target
            .set_field(field.name(), node)
            .map_err(|e| e.within_field(descriptor.type_name(), field.name()))?;
    }

    Ok(target)
}

/// Implements [`Injectable`] and [`FromNode`](crate::inject::FromNode) for a
/// struct.
///
/// Three forms are supported:
///
/// ```ignore
/// // Declare the struct and its impls together (requires `Default`)
/// injectable! {
///     #[derive(Debug, Default)]
///     pub struct Settings {
///         pub host: String,
///         pub port: i32,
///     }
/// }
///
/// // Existing struct constructed with `Default`
/// injectable!(impl Settings { host: String, port: i32 });
///
/// // Existing struct with a fallible constructor
/// injectable!(impl Settings { host: String, port: i32 } construct = Settings::open);
/// ```
#[macro_export]
macro_rules! injectable {
    // Existing struct with a custom constructor
    (impl $name:ident { $($field:ident : $fty:ty),* $(,)? } construct = $ctor:path) => {
        impl $crate::inject::Injectable for $name {
            fn type_name() -> &'static str {
                stringify!($name)
            }

            fn descriptor() -> $crate::inject::TargetDescriptor {
                $crate::inject::TargetDescriptor::new(
                    stringify!($name),
                    vec![
                        $(
                            $crate::inject::FieldDescriptor::new(
                                stringify!($field),
                                <$fty as $crate::inject::FromNode>::classification(),
                            ),
                        )*
                    ],
                )
            }

            fn construct() -> $crate::InjectResult<Self> {
                $ctor()
            }

            #[allow(unused_variables)]
            fn set_field(
                &mut self,
                field: &str,
                node: &$crate::tree::ValueNode,
            ) -> $crate::InjectResult<()> {
                $(
                    if field == stringify!($field) {
                        self.$field = <$fty as $crate::inject::FromNode>::from_node(node)?;
                        return Ok(());
                    }
                )*
                Err($crate::InjectError::field_not_declared(stringify!($name), field))
            }
        }

        impl $crate::inject::FromNode for $name {
            fn classification() -> $crate::inject::FieldClassification {
                $crate::inject::FieldClassification::Composite(stringify!($name).to_string())
            }

            fn from_node(node: &$crate::tree::ValueNode) -> $crate::InjectResult<Self> {
                $crate::inject::populate::<Self>(node.children())
            }
        }
    };

    // Existing struct constructed with Default
    (impl $name:ident { $($field:ident : $fty:ty),* $(,)? }) => {
        $crate::injectable!(impl $name { $($field : $fty),* } construct = $crate::inject::construct_default);
    };

    // Struct definition
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$fmeta:meta])* $fvis:vis $field:ident : $fty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $(#[$fmeta])* $fvis $field : $fty ),*
        }

        $crate::injectable!(impl $name { $($field : $fty),* });
    };
}

/// Constructor used by `injectable!` when no custom one is given.
pub fn construct_default<T: Default>() -> InjectResult<T> {
    Ok(T::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::InjectErrorCode;
    use crate::inject::{FieldClassification, FromNode};

    crate::injectable! {
        #[derive(Debug, Default, Clone, PartialEq)]
        struct Settings {
            host: String,
            port: i32,
        }
    }

    crate::injectable! {
        #[derive(Debug, Default)]
        struct Job {
            name: String,
            retries: i64,
            settings: Settings,
            tags: Vec<String>,
        }
    }

    #[derive(Debug)]
    struct Locked {
        secret: String,
    }

    impl Locked {
        fn open() -> InjectResult<Self> {
            Err(InjectError::construction_failed("Locked", "constructor refused"))
        }
    }

    crate::injectable!(impl Locked { secret: String } construct = Locked::open);

    fn settings_node() -> ValueNode {
        ValueNode::element(
            "settings",
            vec![ValueNode::leaf("host", "x"), ValueNode::leaf("port", "80")],
        )
    }

    #[test]
    fn test_descriptor_in_declaration_order() {
        let descriptor = Job::descriptor();
        let names: Vec<_> = descriptor.fields().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["name", "retries", "settings", "tags"]);
        assert_eq!(
            descriptor.field("settings").unwrap().classification(),
            &FieldClassification::Composite("Settings".into())
        );
        assert_eq!(Job::type_name(), "Job");
    }

    #[test]
    fn test_composite_from_node() {
        let settings = Settings::from_node(&settings_node()).unwrap();
        assert_eq!(
            settings,
            Settings {
                host: "x".into(),
                port: 80
            }
        );
    }

    #[test]
    fn test_populate_nested() {
        let nodes = vec![
            ValueNode::leaf("name", "build"),
            settings_node(),
            ValueNode::element("tags", vec![ValueNode::leaf("t", "a"), ValueNode::leaf("t", "b")]),
        ];
        let job: Job = populate(&nodes).unwrap();
        assert_eq!(job.name, "build");
        assert_eq!(job.retries, 0);
        assert_eq!(job.settings.port, 80);
        assert_eq!(job.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_unknown_field() {
        let err = populate::<Settings>(&[ValueNode::leaf("doesNotExist", "1")]).unwrap_err();
        assert_eq!(err.code(), InjectErrorCode::FieldNotDeclared);
        assert_eq!(err.type_name(), Some("Settings"));
        assert_eq!(err.field_name(), Some("doesNotExist"));
    }

    #[test]
    fn test_unknown_nested_field_names_inner_type() {
        let nodes = vec![ValueNode::element(
            "settings",
            vec![ValueNode::leaf("doesNotExist", "1")],
        )];
        let err = populate::<Job>(&nodes).unwrap_err();
        assert_eq!(err.type_name(), Some("Settings"));
        assert_eq!(err.field_path(), "settings");
    }

    #[test]
    fn test_stray_text_in_composite_is_undeclared() {
        let node = ValueNode::element(
            "settings",
            vec![ValueNode::text("junk"), ValueNode::leaf("host", "x")],
        );
        let err = Settings::from_node(&node).unwrap_err();
        assert_eq!(err.field_name(), Some("#text"));
    }

    #[test]
    fn test_later_node_overwrites() {
        let nodes = vec![ValueNode::leaf("port", "1"), ValueNode::leaf("port", "2")];
        let settings: Settings = populate(&nodes).unwrap();
        assert_eq!(settings.port, 2);
    }

    #[test]
    fn test_conversion_error_path() {
        let nodes = vec![ValueNode::element(
            "settings",
            vec![ValueNode::leaf("port", "eighty")],
        )];
        let err = populate::<Job>(&nodes).unwrap_err();
        assert_eq!(err.code(), InjectErrorCode::ScalarConversionFailed);
        assert_eq!(err.field_path(), "settings.port");
        assert_eq!(err.type_name(), Some("Settings"));
    }

    #[test]
    fn test_construction_failure() {
        let err = populate::<Locked>(&[]).unwrap_err();
        assert_eq!(err.code(), InjectErrorCode::ConstructionFailed);
        assert!(err.message().contains("constructor refused"));
    }

    #[test]
    fn test_private_fields_written() {
        let mut locked = Locked {
            secret: String::new(),
        };
        locked.set_field("secret", &ValueNode::leaf("secret", "s3")).unwrap();
        assert_eq!(locked.secret, "s3");
    }
}
