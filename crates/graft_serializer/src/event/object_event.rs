use crate::context::Context;
use crate::types::TypeDescriptor;
use crate::value::Value;

/// The subject of a pre or post visit event.
///
/// Pre-visit listeners may replace [`data`](Self::set_data) and
/// [`type`](Self::set_type); the navigator continues with the replaced
/// values. Replacements made by post-visit listeners are ignored.
pub struct ObjectEvent<'c, 'a> {
    context: &'c Context<'a>,
    data: Value,
    ty: TypeDescriptor,
    stopped: bool,
}

impl<'c, 'a> ObjectEvent<'c, 'a> {
    pub fn new(context: &'c Context<'a>, data: Value, ty: TypeDescriptor) -> Self {
        Self {
            context,
            data,
            ty,
            stopped: false,
        }
    }

    #[inline]
    pub fn context(&self) -> &Context<'a> {
        self.context
    }

    #[inline]
    pub fn data(&self) -> &Value {
        &self.data
    }

    #[inline]
    pub fn set_data(&mut self, data: Value) {
        self.data = data;
    }

    #[inline]
    pub fn ty(&self) -> &TypeDescriptor {
        &self.ty
    }

    #[inline]
    pub fn set_type(&mut self, ty: TypeDescriptor) {
        self.ty = ty;
    }

    /// Prevents the remaining listeners from running.
    #[inline]
    pub fn stop_propagation(&mut self) {
        self.stopped = true;
    }

    #[inline]
    pub fn is_propagation_stopped(&self) -> bool {
        self.stopped
    }

    #[inline]
    pub fn into_parts(self) -> (Value, TypeDescriptor) {
        (self.data, self.ty)
    }
}
