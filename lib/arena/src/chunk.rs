use std::mem::MaybeUninit;
use std::ptr::NonNull;

/// A fixed-size block of uninitialized memory
pub(crate) struct ArenaChunk<T> {
    elements: NonNull<[MaybeUninit<T>]>,
}

impl<T> ArenaChunk<T> {
    pub fn new(len: usize) -> Self {
        let array = Box::new_uninit_slice(len);
        let elements = Box::into_raw(array);
        let elements = unsafe { NonNull::new_unchecked(elements) };
        Self { elements }
    }

    pub fn capacity(&self) -> usize {
        self.elements.len()
    }

    #[inline(always)]
    pub fn start(&mut self) -> *mut T {
        self.elements.as_ptr() as *mut T
    }

    #[inline(always)]
    pub fn end(&mut self) -> *mut T {
        unsafe { self.start().add(self.elements.len()) }
    }
}

impl<T> Drop for ArenaChunk<T> {
    fn drop(&mut self) {
        /* Elements are never dropped: the only arena using
         * chunks is the dropless one. */
        let elems = unsafe { Box::from_raw(self.elements.as_ptr()) };
        drop(elems);
    }
}
