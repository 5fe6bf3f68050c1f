use crate::{
    directive::ClassDirectives,
    emit::Statement,
    member::MemberDescriptor,
    node::ClassNode,
    phase::{Partition, Phase, PhaseSet},
    prelude::*,
    render::{PipelineRenderer, Render, TokenRenderer},
    strategy::Strategy,
    trace::{TraceEvent, TraceSink},
};
use syn::{Generics, Visibility};

///
/// WiredMember
///

#[derive(Clone, Debug)]
pub struct WiredMember {
    pub descriptor: MemberDescriptor,
    pub strategy: Strategy,
    pub phases: PhaseSet,
}

///
/// ClassUnit
///
/// Everything generated for one owning struct in one pass. Built from the
/// current declaration every time; never updated in place.
///

#[derive(Clone, Debug)]
pub struct ClassUnit {
    pub ident: Ident,
    pub namespace: Vec<String>,
    pub vis: Visibility,
    pub generics: Generics,
    pub directives: ClassDirectives,
    pub members: Vec<WiredMember>,
    pub skipped: Vec<(String, SkipReason)>,
    partition: Partition,
}

impl ClassUnit {
    /// Assemble a class. Members that cannot be wired are recorded in
    /// `skipped`; a class that cannot be extended is skipped as a whole.
    pub fn build(node: &ClassNode, namespace: &[String]) -> Result<Self, SkipReason> {
        if !node.is_extensible() {
            return Err(SkipReason::NotExtensible);
        }

        let mut members = Vec::new();
        let mut skipped = Vec::new();
        let mut partition = Partition::default();

        for (index, member) in node.members().iter().enumerate() {
            // only members carrying `inject` are candidates
            if member.attrs.is_empty() {
                continue;
            }

            let wired = MemberDescriptor::extract(&node.ident, member).and_then(|descriptor| {
                let strategy = Strategy::classify(&descriptor)?;
                let stmt = Statement::emit(&descriptor, &strategy)?;
                let phases = PhaseSet::of(&descriptor.directives, strategy.kind());

                Ok((
                    WiredMember {
                        descriptor,
                        strategy,
                        phases,
                    },
                    stmt,
                ))
            });

            match wired {
                Ok((wired, stmt)) => {
                    partition.push(wired.phases, stmt);
                    members.push(wired);
                }
                Err(reason) => {
                    let name = member
                        .ident
                        .as_ref()
                        .map_or_else(|| index.to_string(), ToString::to_string);
                    skipped.push((name, reason));
                }
            }
        }

        Ok(Self {
            ident: node.ident.clone(),
            namespace: namespace.to_vec(),
            vis: node.vis.clone(),
            generics: node.generics.clone(),
            directives: ClassDirectives::from_attrs(&node.attrs),
            members,
            skipped,
            partition,
        })
    }

    #[must_use]
    pub fn count(&self, phase: Phase) -> usize {
        self.partition.count(phase)
    }

    #[must_use]
    pub fn statements(&self, phase: Phase) -> &[Statement] {
        self.partition.statements(phase)
    }

    /// Pipeline text of one phase, for diagnostics.
    #[must_use]
    pub fn pipeline(&self, phase: Phase) -> Vec<String> {
        self.statements(phase)
            .iter()
            .map(|stmt| PipelineRenderer.statement(stmt))
            .collect()
    }

    /// Whether this unit produces any code at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.partition.is_empty()
            && !self.directives.generate_awake
            && !self.directives.generate_on_validate
            && !self.directives.test_helpers
    }

    /// Report this unit's outcome to a trace sink.
    pub fn trace(&self, sink: &dyn TraceSink) {
        let class = self.ident.to_string();

        for (member, reason) in &self.skipped {
            sink.on_event(TraceEvent::MemberSkipped {
                class: class.clone(),
                member: member.clone(),
                reason: *reason,
            });
        }

        sink.on_event(TraceEvent::ClassGenerated {
            class,
            editor: self.count(Phase::Editor),
            runtime: self.count(Phase::Runtime),
        });
    }

    /// Render the generated items.
    #[must_use]
    pub fn generate(&self, renderer: &TokenRenderer) -> TokenStream {
        let editor = self.initializer(renderer, Phase::Editor);
        let runtime = self.initializer(renderer, Phase::Runtime);
        let accessors = self.accessors();
        let awake = self.awake_hook(renderer);
        let on_validate = self.on_validate_hook(renderer);

        quote! {
            #editor
            #runtime
            #accessors
            #awake
            #on_validate
        }
    }

    // initializer
    // one inherent impl per non-empty phase; editor impls vanish without the feature
    fn initializer(&self, renderer: &TokenRenderer, phase: Phase) -> TokenStream {
        if self.count(phase) == 0 {
            return quote!();
        }

        let facade = renderer.facade();
        let ident = &self.ident;
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();
        let vis = self.method_vis();
        let method = format_ident!("{}", phase.method_name());
        let imports = renderer.imports(&self.partition.imports(phase));
        let stmts = self
            .statements(phase)
            .iter()
            .map(|stmt| renderer.statement(stmt));

        let item = quote! {
            #[automatically_derived]
            impl #impl_generics #ident #ty_generics #where_clause {
                #[allow(dead_code, unused_variables)]
                #vis fn #method<__H: #facade::Host>(
                    &mut self,
                    host: &mut __H,
                    this: #facade::Entity,
                ) {
                    #imports
                    #(#stmts)*
                }
            }
        };

        match phase {
            Phase::Editor => quote!(#facade::__editor_only! { #item }),
            Phase::Runtime => item,
        }
    }

    // method_vis
    fn method_vis(&self) -> TokenStream {
        if self.directives.test_helpers {
            quote!(pub)
        } else {
            self.vis.to_token_stream()
        }
    }

    // accessors
    fn accessors(&self) -> TokenStream {
        if !self.directives.test_helpers || self.members.is_empty() {
            return quote!();
        }

        let ident = &self.ident;
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();
        let methods = self.members.iter().map(|member| {
            let field = &member.descriptor.ident;
            let ty = &member.descriptor.ty;
            let setter = format_ident!("set_{}", field);

            quote! {
                pub fn #field(&self) -> &#ty {
                    &self.#field
                }

                pub fn #setter(&mut self, value: #ty) {
                    self.#field = value;
                }
            }
        });

        quote! {
            #[automatically_derived]
            impl #impl_generics #ident #ty_generics #where_clause {
                #(#methods)*
            }
        }
    }

    // awake_hook
    fn awake_hook(&self, renderer: &TokenRenderer) -> TokenStream {
        if !self.directives.generate_awake {
            return quote!();
        }

        let facade = renderer.facade();
        let ident = &self.ident;
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();
        let body = self.hook_body(Phase::Runtime);

        quote! {
            #[automatically_derived]
            impl #impl_generics #facade::Awake for #ident #ty_generics #where_clause {
                fn awake<__H: #facade::Host>(&mut self, host: &mut __H, this: #facade::Entity) {
                    #body
                }
            }
        }
    }

    // on_validate_hook
    fn on_validate_hook(&self, renderer: &TokenRenderer) -> TokenStream {
        if !self.directives.generate_on_validate {
            return quote!();
        }

        let facade = renderer.facade();
        let ident = &self.ident;
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();
        let body = self.hook_body(Phase::Editor);

        quote! {
            #facade::__editor_only! {
                #[automatically_derived]
                impl #impl_generics #facade::OnValidate for #ident #ty_generics #where_clause {
                    fn on_validate<__H: #facade::Host>(
                        &mut self,
                        host: &mut __H,
                        this: #facade::Entity,
                    ) {
                        #body
                    }
                }
            }
        }
    }

    // hook_body
    // a hook whose phase has nothing to run is a no-op
    fn hook_body(&self, phase: Phase) -> TokenStream {
        if self.count(phase) == 0 {
            return quote!(let _ = (host, this););
        }

        let method = format_ident!("{}", phase.method_name());
        quote!(self.#method(host, this);)
    }
}

///
/// TESTS
///
