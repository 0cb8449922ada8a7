//! Containers of elements

use std::collections::VecDeque;

use crate::element::{Element, Shape};
use crate::error::{BindError, BindResult};

/// An ordered collection the binder reads elements from or appends them to
pub trait Container {
    /// Element type
    type Item: Element;

    /// Whether elements can be appended
    fn is_growable(&self) -> bool;

    /// Number of elements
    fn len(&self) -> usize;

    /// Whether the container holds no elements
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index`
    fn item(&self, index: usize) -> Option<&Self::Item>;

    /// Append an element
    fn push(&mut self, item: Self::Item) -> BindResult<()>;
}

impl<T: Element> Container for Vec<T> {
    type Item = T;

    fn is_growable(&self) -> bool {
        true
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn item(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    fn push(&mut self, item: T) -> BindResult<()> {
        Vec::push(self, item);
        Ok(())
    }
}

impl<T: Element> Container for VecDeque<T> {
    type Item = T;

    fn is_growable(&self) -> bool {
        true
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn item(&self, index: usize) -> Option<&T> {
        VecDeque::get(self, index)
    }

    fn push(&mut self, item: T) -> BindResult<()> {
        self.push_back(item);
        Ok(())
    }
}

impl<T: Element> Container for [T] {
    type Item = T;

    fn is_growable(&self) -> bool {
        false
    }

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn item(&self, index: usize) -> Option<&T> {
        <[T]>::get(self, index)
    }

    fn push(&mut self, _item: T) -> BindResult<()> {
        Err(BindError::ContainerInvalid("slices have a fixed length"))
    }
}

impl<T: Element, const N: usize> Container for [T; N] {
    type Item = T;

    fn is_growable(&self) -> bool {
        false
    }

    fn len(&self) -> usize {
        N
    }

    fn item(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    fn push(&mut self, _item: T) -> BindResult<()> {
        Err(BindError::ContainerInvalid("arrays have a fixed length"))
    }
}

/// Decide how a container's elements bind
///
/// Reading needs a growable container; scalar elements have no strategy.
/// Nothing here touches the grid.
pub fn classify<C: Container + ?Sized>(container: &C, for_read: bool) -> BindResult<Shape> {
    if for_read && !container.is_growable() {
        return Err(BindError::ContainerInvalid(
            "unmarshal needs a growable container",
        ));
    }
    match <C::Item as Element>::SHAPE {
        Shape::Scalar => Err(BindError::NoStrategyFound(<C::Item as Element>::TYPE_NAME)),
        shape => Ok(shape),
    }
}
