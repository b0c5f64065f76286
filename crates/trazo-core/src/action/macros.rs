//! Macro utilitaria para reducir boilerplate al declarar acciones.
//!
//! Exportada en la raíz del crate para poder usarla como:
//!   use trazo_core::action;
//!
//! La macro genera el struct de la acción (slots de entrada como
//! `Option<T>` más campos de estado), el descriptor estático construido una
//! única vez, la `registration()` para el registro, y el impl de
//! `ActionBinding` (decodificación vía `ValueSpec`). Las etapas del ciclo de
//! vida (`ActionStages`) se implementan a mano por acción.
//!
//! Forma:
//! ```ignore
//! action! {
//!     action CreateThingAction {
//!         command: "CreateThing",
//!         description: "creates a thing",
//!         fields { thing: Option<Thing> },
//!         inputs {
//!             name["Name"]: String =
//!                 InputDescriptor::new(1, "Name", ValueKind::Text, "the name"),
//!         },
//!         outputs {
//!             "Thing" => OutputDescriptor::new(1, "Thing", ValueKind::Element, "the thing"),
//!                 get(this) { this.thing.clone().map(ValueSpec::into_value) }
//!         }
//!     }
//! }
//! ```

#[macro_export]
macro_rules! action {
    // ---------------- Con campos de estado ----------------
    (
        action $name:ident {
            command: $cmd:expr,
            description: $desc:expr,
            fields { $($sfname:ident : $sfty:ty),* $(,)? },
            inputs { $($fname:ident [$iname:expr] : $fty:ty = $idesc:expr),* $(,)? },
            outputs { $($oname:expr => $odesc:expr, get($oself:ident) $oget:block)* }
        }
    ) => {
        #[derive(Debug, Default)]
        pub struct $name {
            $(pub $fname: Option<$fty>,)*
            $(pub $sfname: $sfty,)*
        }

        impl $name {
            pub fn new() -> Self { Self::default() }

            /// Descriptor estático: una sola construcción por proceso.
            pub fn action_descriptor() -> &'static $crate::action::ActionDescriptor {
                static DESCRIPTOR: ::std::sync::OnceLock<$crate::action::ActionDescriptor> =
                    ::std::sync::OnceLock::new();
                DESCRIPTOR.get_or_init(|| {
                    $crate::action::ActionDescriptor::new($cmd, $desc)
                        .with_inputs(vec![$($idesc),*])
                        .with_outputs(vec![$($odesc),*])
                })
            }

            pub fn registration() -> $crate::action::ActionRegistration {
                $crate::action::ActionRegistration::new(
                    Self::action_descriptor(),
                    || Box::new($name::new()) as Box<dyn $crate::action::Action>,
                )
            }
        }

        impl $crate::action::ActionBinding for $name {
            fn descriptor(&self) -> &'static $crate::action::ActionDescriptor {
                Self::action_descriptor()
            }

            fn set_input(&mut self, name: &str, value: $crate::model::Value)
                         -> Result<(), $crate::errors::CoreActionError> {
                $(
                    if name == $iname {
                        let decoded = <$fty as $crate::model::ValueSpec>::from_value(&value)?;
                        self.$fname = Some(decoded);
                        return Ok(());
                    }
                )*
                let _ = value;
                Err($crate::errors::CoreActionError::UnknownInput(name.to_string()))
            }

            fn output(&self, name: &str) -> Option<$crate::model::Value> {
                $(
                    if name == $oname {
                        let $oself = self;
                        return $oget;
                    }
                )*
                None
            }
        }
    };

    // ---------------- Sin campos de estado ----------------
    (
        action $name:ident {
            command: $cmd:expr,
            description: $desc:expr,
            inputs { $($fname:ident [$iname:expr] : $fty:ty = $idesc:expr),* $(,)? },
            outputs { $($oname:expr => $odesc:expr, get($oself:ident) $oget:block)* }
        }
    ) => {
        $crate::action! {
            action $name {
                command: $cmd,
                description: $desc,
                fields {},
                inputs { $($fname [$iname] : $fty = $idesc),* },
                outputs { $($oname => $odesc, get($oself) $oget)* }
            }
        }
    };
}
