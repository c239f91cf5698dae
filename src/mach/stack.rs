use super::STACK_CAPACITY;
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Stack enforced and size limited vector

pub struct Stack<T> {
    overflow_message: &'static str,
    max_len: usize,
    vec: Vec<T>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.vec)
    }
}

impl<T> Stack<T> {
    pub fn new(overflow_message: &'static str) -> Stack<T> {
        Stack::with_max_len(overflow_message, STACK_CAPACITY)
    }
    pub fn with_max_len(overflow_message: &'static str, max_len: usize) -> Stack<T> {
        Stack {
            overflow_message,
            max_len,
            vec: Vec::with_capacity(max_len.min(STACK_CAPACITY)),
        }
    }
    pub fn max_len(&self) -> usize {
        self.max_len
    }
    fn underflow_error(&self) -> Error {
        error!(StackUnderflow)
    }
    pub fn clear(&mut self) {
        self.vec.clear()
    }
    pub fn len(&self) -> usize {
        self.vec.len()
    }
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }
    pub fn is_full(&self) -> bool {
        self.vec.len() >= self.max_len
    }
    pub fn last(&self) -> Option<&T> {
        self.vec.last()
    }
    pub fn push(&mut self, val: T) -> Result<()> {
        if self.is_full() {
            return Err(error!(StackOverflow; self.overflow_message));
        }
        self.vec.push(val);
        Ok(())
    }
    pub fn pop(&mut self) -> Result<T> {
        match self.vec.pop() {
            Some(v) => Ok(v),
            None => Err(self.underflow_error()),
        }
    }
    pub fn pop_2(&mut self) -> Result<(T, T)> {
        if self.vec.len() < 2 {
            return Err(self.underflow_error());
        }
        let two = self.pop()?;
        let one = self.pop()?;
        Ok((one, two))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    #[test]
    fn test_overflow_leaves_stack_intact() {
        let mut s: Stack<u8> = Stack::with_max_len("TOO MANY", 2);
        s.push(1).unwrap();
        s.push(2).unwrap();
        let e = s.push(3).unwrap_err();
        assert_eq!(e.code(), ErrorCode::StackOverflow);
        assert_eq!(e.to_string(), "STACK OVERFLOW; TOO MANY");
        assert_eq!(s.len(), 2);
        assert_eq!(s.last(), Some(&2));
    }

    #[test]
    fn test_pop_2_order_and_underflow() {
        let mut s: Stack<u8> = Stack::new("");
        s.push(1).unwrap();
        assert_eq!(s.pop_2().unwrap_err().code(), ErrorCode::StackUnderflow);
        assert_eq!(s.len(), 1);
        s.push(2).unwrap();
        assert_eq!(s.pop_2().unwrap(), (1, 2));
        assert!(s.is_empty());
        assert_eq!(s.pop().unwrap_err().code(), ErrorCode::StackUnderflow);
    }
}
